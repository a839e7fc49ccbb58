//! Locating image references in Markdown text.
//!
//! Two independent patterns are recognised: Markdown image markup and embedded `<img>` tags.
//! Each pattern is scanned on its own, so a fragment written in both forms yields two
//! references. Only references into a known external image cache are eligible for rewriting.

mod filters;
mod scanner;

pub use filters::{is_cache_reference, normalise_separators};
pub use scanner::{scan_embedded, scan_inline, scan_references};
