/// Convert every backslash to a forward slash.
pub fn normalise_separators(value: &str) -> String {
    value.replace('\\', "/")
}

/// Determine whether a referenced path points into one of the external image caches.
///
/// Markers and the path are compared with separators normalised, so both
/// `AppData\Roaming\...` and `AppData/Roaming/...` forms are recognised.
pub fn is_cache_reference<S: AsRef<str>>(path: &str, markers: &[S]) -> bool {
    let path = normalise_separators(path);
    markers.iter().any(|marker| {
        let marker = normalise_separators(marker.as_ref());
        !marker.is_empty() && path.contains(&marker)
    })
}
