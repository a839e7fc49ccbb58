use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Rewrite both separator styles to the platform separator.
pub fn normalise_source_path(raw: &str) -> PathBuf {
    let normalised: String = raw
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();
    PathBuf::from(normalised)
}

/// Final path component of a referenced path, splitting on either separator.
pub fn base_file_name(raw: &str) -> Option<&str> {
    raw.rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
}

/// Insert `_<counter>` before the extension, e.g. `shot.png` -> `shot_2.png`.
pub fn suffixed_name(file_name: &str, counter: usize) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    match path.extension() {
        Some(ext) => format!("{stem}_{counter}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{counter}"),
    }
}

/// Number of directories between the scan root and a document.
pub fn document_depth(root: &Path, document: &Path) -> usize {
    document
        .strip_prefix(root)
        .map(|relative| relative.components().count().saturating_sub(1))
        .unwrap_or(0)
}

/// Relative link from a document at `depth` to a file in the image folder.
pub fn relative_image_path(depth: usize, image_dir_name: &str, file_name: &str) -> String {
    if depth == 0 {
        format!("./{image_dir_name}/{file_name}")
    } else {
        format!("{}{image_dir_name}/{file_name}", "../".repeat(depth))
    }
}
