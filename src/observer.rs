//! Progress callbacks emitted while a run walks the tree.

use std::path::Path;

/// Receives progress notifications from [`crate::Localizer`].
///
/// Every method has an empty default so observers only implement what they display.
pub trait RunObserver {
    /// A document is about to be processed. `relative` is relative to the scan root.
    fn document_started(&mut self, _relative: &Path) {}

    /// An image was copied into the image folder under `file_name`.
    fn image_copied(&mut self, _file_name: &str) {}

    /// A reference reused an image already copied during this run.
    fn image_reused(&mut self, _file_name: &str) {}

    /// A referenced source image does not exist.
    fn image_missing(&mut self, _source: &str) {}

    /// A document was rewritten and its original saved to `backup`.
    fn document_updated(&mut self, _relative: &Path, _backup: &Path) {}

    /// Processing a document failed; the run continues with the next one.
    fn document_failed(&mut self, _relative: &Path, _message: &str) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {}
