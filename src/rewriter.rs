//! Rewriting cache references in a single document's text.

use tracing::warn;

use crate::config::LocalizerConfig;
use crate::errors::{LocalizeError, LocalizeResult};
use crate::models::{DocumentOutcome, RunReport};
use crate::observer::RunObserver;
use crate::references::{is_cache_reference, scan_references};
use crate::relocate::{ImageResolver, relative_image_path};

/// Localize every eligible reference in `original` for a document `depth` levels below
/// the scan root.
///
/// References are discovered on the original text and substituted into a working copy,
/// so substitutions never create new matches. Copies, reuses, and missing sources are
/// recorded in `report` as each reference is handled, so they stay counted even when a
/// later reference fails. A missing source leaves its reference untouched; any other
/// resolver failure aborts the document.
pub fn rewrite_document(
    original: &str,
    depth: usize,
    config: &LocalizerConfig,
    resolver: &mut ImageResolver,
    report: &mut RunReport,
    observer: &mut dyn RunObserver,
) -> LocalizeResult<DocumentOutcome> {
    let mut outcome = DocumentOutcome {
        content: original.to_string(),
        changed: false,
    };

    for reference in scan_references(original) {
        if !is_cache_reference(reference.path, &config.cache_markers) {
            continue;
        }

        let resolved = match resolver.resolve(reference.path) {
            Ok(resolved) => resolved,
            Err(LocalizeError::SourceMissing { path }) => {
                warn!(source = %path, "image file not found");
                observer.image_missing(&path);
                report.missing_images.push(path);
                continue;
            }
            Err(err) => return Err(err),
        };

        if resolved.copied {
            report.images_copied += 1;
            observer.image_copied(&resolved.file_name);
        } else {
            report.images_reused += 1;
            observer.image_reused(&resolved.file_name);
        }

        let new_path = relative_image_path(depth, &config.image_dir_name, &resolved.file_name);
        outcome.content = outcome
            .content
            .replace(reference.replacement_target(), &reference.rewritten(&new_path));
    }

    outcome.changed = outcome.content != original;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::SilentObserver;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn cache_path(root: &Path, name: &str) -> String {
        root.join("AppData/Roaming/Typora/typora-user-images")
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    fn setup() -> (tempfile::TempDir, ImageResolver) {
        let temp = tempdir().unwrap();
        let cache = temp.path().join("AppData/Roaming/Typora/typora-user-images");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("foo.png"), b"foo").unwrap();
        let image_dir = temp.path().join("notes/image");
        fs::create_dir_all(&image_dir).unwrap();
        let resolver = ImageResolver::new(image_dir);
        (temp, resolver)
    }

    #[test]
    fn rewrites_inline_reference_with_alt_text() {
        let (temp, mut resolver) = setup();
        let mut report = RunReport::default();
        let source = cache_path(temp.path(), "foo.png");
        let text = format!("# Title\n\n![diagram]({source})\n");

        let outcome = rewrite_document(
            &text,
            0,
            &LocalizerConfig::default(),
            &mut resolver,
            &mut report,
            &mut SilentObserver,
        )
        .unwrap();

        assert!(outcome.changed);
        assert_eq!(outcome.content, "# Title\n\n![diagram](./image/foo.png)\n");
        assert_eq!(report.images_copied, 1);
    }

    #[test]
    fn embedded_reference_replaces_every_occurrence_of_path() {
        let (temp, mut resolver) = setup();
        let mut report = RunReport::default();
        let source = cache_path(temp.path(), "foo.png");
        let text = format!("<img src=\"{source}\" width=\"40\">\nraw: {source}\n");

        let outcome = rewrite_document(
            &text,
            1,
            &LocalizerConfig::default(),
            &mut resolver,
            &mut report,
            &mut SilentObserver,
        )
        .unwrap();

        assert_eq!(
            outcome.content,
            "<img src=\"../image/foo.png\" width=\"40\">\nraw: ../image/foo.png\n"
        );
    }

    #[test]
    fn inline_reference_only_replaces_matched_fragment() {
        let (temp, mut resolver) = setup();
        let mut report = RunReport::default();
        let source = cache_path(temp.path(), "foo.png");
        let text = format!("![a]({source})\nplain mention {source}\n");

        let outcome = rewrite_document(
            &text,
            0,
            &LocalizerConfig::default(),
            &mut resolver,
            &mut report,
            &mut SilentObserver,
        )
        .unwrap();

        assert_eq!(
            outcome.content,
            format!("![a](./image/foo.png)\nplain mention {source}\n")
        );
    }

    #[test]
    fn missing_source_leaves_text_unchanged() {
        let (temp, mut resolver) = setup();
        let mut report = RunReport::default();
        let source = cache_path(temp.path(), "gone.png");
        let text = format!("![x]({source})");

        let outcome = rewrite_document(
            &text,
            0,
            &LocalizerConfig::default(),
            &mut resolver,
            &mut report,
            &mut SilentObserver,
        )
        .unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.content, text);
        assert_eq!(report.missing_images.len(), 1);
        assert!(report.missing_images[0].ends_with("gone.png"));
    }

    #[test]
    fn non_cache_references_are_untouched() {
        let (_temp, mut resolver) = setup();
        let mut report = RunReport::default();
        let text = "![local](./pics/a.png) <img src=\"https://x.org/b.png\">";

        let outcome = rewrite_document(
            text,
            0,
            &LocalizerConfig::default(),
            &mut resolver,
            &mut report,
            &mut SilentObserver,
        )
        .unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.content, text);
        assert_eq!(report.images_copied, 0);
    }

    #[test]
    fn repeated_reference_copies_once() {
        let (temp, mut resolver) = setup();
        let mut report = RunReport::default();
        let source = cache_path(temp.path(), "foo.png");
        let text = format!("![a]({source}) ![b]({source})");

        let outcome = rewrite_document(
            &text,
            0,
            &LocalizerConfig::default(),
            &mut resolver,
            &mut report,
            &mut SilentObserver,
        )
        .unwrap();

        assert_eq!(outcome.content, "![a](./image/foo.png) ![b](./image/foo.png)");
        assert_eq!(report.images_copied, 1);
        assert_eq!(report.images_reused, 1);
    }

    #[test]
    fn counts_survive_a_later_failing_reference() {
        let (temp, mut resolver) = setup();
        let mut report = RunReport::default();
        let cache = temp.path().join("AppData/Roaming/Typora/typora-user-images");
        fs::create_dir_all(cache.join("dir.png")).unwrap();
        let text = format!(
            "![m]({}) ![f]({}) ![d]({})",
            cache_path(temp.path(), "gone.png"),
            cache_path(temp.path(), "foo.png"),
            cache_path(temp.path(), "dir.png"),
        );

        let err = rewrite_document(
            &text,
            0,
            &LocalizerConfig::default(),
            &mut resolver,
            &mut report,
            &mut SilentObserver,
        )
        .unwrap_err();

        assert!(matches!(err, LocalizeError::Copy { .. }));
        assert_eq!(report.images_copied, 1);
        assert_eq!(report.missing_images.len(), 1);
        assert!(report.missing_images[0].ends_with("gone.png"));
    }
}
