//! Copying cached images into the project image folder with content deduplication.

mod paths;
mod registry;
mod resolver;

pub use paths::{
    base_file_name, document_depth, normalise_source_path, relative_image_path, suffixed_name,
};
pub use registry::HashRegistry;
pub use resolver::ImageResolver;
pub(crate) use resolver::copy_with_times;
