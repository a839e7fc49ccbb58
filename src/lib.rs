#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod console;
pub mod errors;
pub mod hashing;
pub mod localizer;
pub mod models;
pub mod observer;
pub mod references;
pub mod relocate;
pub mod rewriter;

pub use config::LocalizerConfig;
pub use errors::{LocalizeError, LocalizeResult};
pub use localizer::Localizer;
pub use models::RunReport;
pub use observer::{RunObserver, SilentObserver};
