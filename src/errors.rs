//! Error types raised while localizing images and rewriting documents.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the resolver and the run driver.
#[derive(Debug, Error)]
pub enum LocalizeError {
    /// A referenced source image does not exist.
    #[error("image file not found: {path}")]
    SourceMissing {
        /// Normalised source path as written in the document.
        path: String,
    },

    /// A referenced path has no file name component.
    #[error("image reference has no file name: {path}")]
    NoFileName {
        /// Raw path as written in the document.
        path: String,
    },

    /// Copying an image into the image folder failed.
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        /// Source image path.
        from: PathBuf,
        /// Destination path inside the image folder.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A Markdown document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadDocument {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing the backup sibling of a document failed.
    #[error("failed to write backup {}: {source}", path.display())]
    Backup {
        /// Backup path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Overwriting a document with its rewritten content failed.
    #[error("failed to write {}: {source}", path.display())]
    WriteDocument {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The image folder could not be created at the scan root.
    #[error("failed to create image folder {}: {source}", path.display())]
    CreateImageDir {
        /// Image folder path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Result alias used throughout the crate.
pub type LocalizeResult<T> = Result<T, LocalizeError>;
