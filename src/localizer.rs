//! Run driver: walks the tree, rewrites documents, and accumulates the run report.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::config::LocalizerConfig;
use crate::errors::{LocalizeError, LocalizeResult};
use crate::models::{FailedDocument, RunReport};
use crate::observer::RunObserver;
use crate::relocate::{ImageResolver, copy_with_times, document_depth};
use crate::rewriter::rewrite_document;

/// Localizes cache image references for every Markdown document under a root directory.
#[derive(Debug, Clone)]
pub struct Localizer {
    root: PathBuf,
    config: LocalizerConfig,
}

impl Localizer {
    /// Create a localizer for `root` using the provided configuration.
    pub fn new(root: impl Into<PathBuf>, config: LocalizerConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Configuration in effect for the run.
    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    /// Image folder at the scan root.
    pub fn image_dir(&self) -> PathBuf {
        self.config.image_dir(&self.root)
    }

    /// Markdown documents under the root in sorted order, skipping the image folder.
    pub fn markdown_files(&self) -> Vec<PathBuf> {
        let image_dir = self.image_dir();
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.path() != image_dir)
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.config.is_markdown(entry.path()))
            .map(|entry| entry.into_path())
            .collect()
    }

    /// Execute one pass over the tree.
    ///
    /// Only creating the image folder can fail the whole run. Failures inside a single
    /// document are logged, reported to the observer, and recorded in the report.
    pub fn run(&self, observer: &mut dyn RunObserver) -> LocalizeResult<RunReport> {
        let image_dir = self.image_dir();
        fs::create_dir_all(&image_dir).map_err(|source| LocalizeError::CreateImageDir {
            path: image_dir.clone(),
            source,
        })?;

        let mut resolver = ImageResolver::new(image_dir);
        let mut report = RunReport::default();

        for document in self.markdown_files() {
            let relative = document
                .strip_prefix(&self.root)
                .unwrap_or(&document)
                .to_path_buf();
            observer.document_started(&relative);
            report.documents_scanned += 1;

            match self.process_document(&document, &mut resolver, &mut report, observer) {
                Ok(backup) => {
                    if let Some(backup) = backup {
                        info!(document = %relative.display(), "updated document");
                        observer.document_updated(&relative, &backup);
                        report.documents_updated += 1;
                        report.updated_files.push(relative);
                    }
                }
                Err(err) => {
                    error!(document = %relative.display(), error = %err, "failed to process document");
                    let message = err.to_string();
                    observer.document_failed(&relative, &message);
                    report.failed_documents.push(FailedDocument {
                        path: relative,
                        message,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Rewrite one document, returning the backup path when it changed.
    fn process_document(
        &self,
        document: &Path,
        resolver: &mut ImageResolver,
        report: &mut RunReport,
        observer: &mut dyn RunObserver,
    ) -> LocalizeResult<Option<PathBuf>> {
        let original =
            fs::read_to_string(document).map_err(|source| LocalizeError::ReadDocument {
                path: document.to_path_buf(),
                source,
            })?;

        let depth = document_depth(&self.root, document);
        let outcome =
            rewrite_document(&original, depth, &self.config, resolver, report, observer)?;
        if !outcome.changed {
            debug!(document = %document.display(), "no cache references rewritten");
            return Ok(None);
        }

        let backup = self.config.backup_path(document);
        copy_with_times(document, &backup).map_err(|source| LocalizeError::Backup {
            path: backup.clone(),
            source,
        })?;
        fs::write(document, &outcome.content).map_err(|source| LocalizeError::WriteDocument {
            path: document.to_path_buf(),
            source,
        })?;

        Ok(Some(backup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::SilentObserver;
    use tempfile::tempdir;

    #[test]
    fn markdown_files_are_sorted_and_skip_image_folder() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("b/c")).unwrap();
        fs::create_dir_all(root.join("image")).unwrap();
        fs::write(root.join("b/c/deep.md"), "").unwrap();
        fs::write(root.join("a.md"), "").unwrap();
        fs::write(root.join("a.md.bak"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join("image/stray.md"), "").unwrap();

        let localizer = Localizer::new(root, LocalizerConfig::default());
        let files = localizer.markdown_files();

        assert_eq!(files, vec![root.join("a.md"), root.join("b/c/deep.md")]);
    }

    #[test]
    fn run_creates_image_folder_even_without_documents() {
        let temp = tempdir().unwrap();
        let localizer = Localizer::new(temp.path(), LocalizerConfig::default());

        let report = localizer.run(&mut SilentObserver).unwrap();

        assert!(temp.path().join("image").is_dir());
        assert_eq!(report.documents_scanned, 0);
        assert_eq!(report.documents_updated, 0);
    }

    #[test]
    fn unreadable_document_is_recorded_and_run_continues() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(root.join("bad.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        fs::write(root.join("good.md"), "# fine").unwrap();

        let localizer = Localizer::new(root, LocalizerConfig::default());
        let report = localizer.run(&mut SilentObserver).unwrap();

        assert_eq!(report.documents_scanned, 2);
        assert_eq!(report.failed_documents.len(), 1);
        assert_eq!(report.failed_documents[0].path, PathBuf::from("bad.md"));
    }

    #[test]
    fn image_folder_blocked_by_file_fails_run() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("image"), "not a folder").unwrap();

        let localizer = Localizer::new(temp.path(), LocalizerConfig::default());
        let err = localizer.run(&mut SilentObserver).unwrap_err();

        assert!(matches!(err, LocalizeError::CreateImageDir { .. }));
    }
}
