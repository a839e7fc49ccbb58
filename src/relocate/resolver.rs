use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use same_file::is_same_file;
use tracing::{debug, info, warn};

use super::paths::{base_file_name, normalise_source_path, suffixed_name};
use super::registry::HashRegistry;
use crate::errors::{LocalizeError, LocalizeResult};
use crate::hashing::content_hash;
use crate::models::ResolvedImage;

/// Decides destination names inside the image folder and performs the copies.
#[derive(Debug)]
pub struct ImageResolver {
    image_dir: PathBuf,
    registry: HashRegistry,
}

impl ImageResolver {
    /// Create a resolver writing into `image_dir` with an empty registry.
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
            registry: HashRegistry::new(),
        }
    }

    /// Resolve a raw referenced path to a file name inside the image folder.
    ///
    /// Content already copied during this run is reused without another copy. A different
    /// file occupying the candidate name pushes the copy to `name_1.ext`, `name_2.ext`, ...
    pub fn resolve(&mut self, raw_path: &str) -> LocalizeResult<ResolvedImage> {
        let source = normalise_source_path(raw_path);
        let file_name = base_file_name(raw_path).ok_or_else(|| LocalizeError::NoFileName {
            path: raw_path.to_string(),
        })?;

        if !source.exists() {
            return Err(LocalizeError::SourceMissing {
                path: source.display().to_string(),
            });
        }

        let source_hash = content_hash(&source);
        if let Some(existing) = source_hash
            .as_deref()
            .and_then(|hash| self.registry.lookup(hash))
        {
            debug!(source = %source.display(), name = existing, "image content already copied");
            return Ok(ResolvedImage {
                file_name: existing.to_string(),
                copied: false,
            });
        }

        let file_name = self.free_name(file_name, source_hash.as_deref());
        let destination = self.image_dir.join(&file_name);
        install_image(&source, &destination)?;
        info!(source = %source.display(), destination = %destination.display(), "copied image");

        if let Some(hash) = source_hash {
            self.registry.register(hash, file_name.clone());
        }

        Ok(ResolvedImage {
            file_name,
            copied: true,
        })
    }

    fn free_name(&self, file_name: &str, source_hash: Option<&str>) -> String {
        let candidate = self.image_dir.join(file_name);
        if !candidate.exists() {
            return file_name.to_string();
        }

        let existing_hash = content_hash(&candidate);
        if source_hash.is_some() && existing_hash.as_deref() == source_hash {
            return file_name.to_string();
        }

        let mut counter = 1;
        loop {
            let name = suffixed_name(file_name, counter);
            if !self.image_dir.join(&name).exists() {
                debug!(original = file_name, renamed = %name, "destination name taken by different content");
                return name;
            }
            counter += 1;
        }
    }
}

fn install_image(source: &Path, destination: &Path) -> LocalizeResult<()> {
    let copy_error = |source_err: io::Error| LocalizeError::Copy {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: source_err,
    };

    if destination.exists() && is_same_file(source, destination).map_err(copy_error)? {
        return Ok(());
    }

    copy_with_times(source, destination).map_err(copy_error)?;
    Ok(())
}

/// Copy a file and carry over its modification time when the platform allows it.
pub(crate) fn copy_with_times(source: &Path, destination: &Path) -> io::Result<u64> {
    let bytes = fs::copy(source, destination)?;
    if let Err(err) = preserve_modified_time(source, destination) {
        warn!(destination = %destination.display(), error = %err, "could not preserve modification time");
    }
    Ok(bytes)
}

fn preserve_modified_time(source: &Path, destination: &Path) -> io::Result<()> {
    let modified = fs::metadata(source)?.modified()?;
    File::options()
        .write(true)
        .open(destination)?
        .set_modified(modified)
}
