//! Data structures produced while localizing image references.

use std::path::PathBuf;

use serde::Serialize;

/// Syntactic form an image reference was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Markdown image markup, `![alt](path)`.
    Inline,
    /// Embedded HTML markup, `<img src="path">`.
    Embedded,
}

/// A single image reference found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference<'a> {
    /// Which of the two patterns produced the match.
    pub kind: ReferenceKind,
    /// Exact text matched in the document.
    pub matched: &'a str,
    /// Alt text for inline references; empty for embedded ones.
    pub alt: &'a str,
    /// Raw referenced path exactly as written.
    pub path: &'a str,
}

impl ImageReference<'_> {
    /// Replacement text for this reference pointing at `new_path`.
    pub fn rewritten(&self, new_path: &str) -> String {
        match self.kind {
            ReferenceKind::Inline => format!("![{}]({})", self.alt, new_path),
            ReferenceKind::Embedded => new_path.to_string(),
        }
    }

    /// Text that is substituted in the document when rewriting.
    ///
    /// Inline references replace the whole matched fragment; embedded references replace
    /// every occurrence of the raw path string.
    pub fn replacement_target(&self) -> &str {
        match self.kind {
            ReferenceKind::Inline => self.matched,
            ReferenceKind::Embedded => self.path,
        }
    }
}

/// Outcome of resolving one source image into the image folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Final file name inside the image folder.
    pub file_name: String,
    /// Whether bytes were copied for this reference.
    pub copied: bool,
}

/// Result of processing a single document's text.
#[derive(Debug, Clone, Default)]
pub struct DocumentOutcome {
    /// Updated document text.
    pub content: String,
    /// Whether the text differs from the original.
    pub changed: bool,
}

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDocument {
    /// Document path relative to the scan root.
    pub path: PathBuf,
    /// Human readable failure description.
    pub message: String,
}

/// Run-level statistics accumulated by [`crate::Localizer`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Number of Markdown documents visited.
    pub documents_scanned: usize,
    /// Number of documents rewritten on disk.
    pub documents_updated: usize,
    /// Number of image files copied into the image folder.
    pub images_copied: usize,
    /// Number of references satisfied by an image already copied in this run.
    pub images_reused: usize,
    /// Rewritten documents, relative to the scan root.
    pub updated_files: Vec<PathBuf>,
    /// Referenced source images that do not exist.
    pub missing_images: Vec<String>,
    /// Documents whose processing failed.
    pub failed_documents: Vec<FailedDocument>,
}
