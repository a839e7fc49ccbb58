use std::sync::OnceLock;

use regex::Regex;

use crate::models::{ImageReference, ReferenceKind};

fn inline_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("invalid inline image regex")
    })
}

fn embedded_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"<img[^>]+src=["']([^"']+)["']"#).expect("invalid embedded image regex")
    })
}

/// Lazily yield `![alt](path)` references in left-to-right order.
pub fn scan_inline(text: &str) -> impl Iterator<Item = ImageReference<'_>> {
    inline_pattern().captures_iter(text).filter_map(|caps| {
        let matched = caps.get(0)?;
        let alt = caps.get(1).map_or("", |m| m.as_str());
        let path = caps.get(2)?;
        Some(ImageReference {
            kind: ReferenceKind::Inline,
            matched: matched.as_str(),
            alt,
            path: path.as_str(),
        })
    })
}

/// Lazily yield `<img ... src="path">` references in left-to-right order.
pub fn scan_embedded(text: &str) -> impl Iterator<Item = ImageReference<'_>> {
    embedded_pattern().captures_iter(text).filter_map(|caps| {
        let matched = caps.get(0)?;
        let path = caps.get(1)?;
        Some(ImageReference {
            kind: ReferenceKind::Embedded,
            matched: matched.as_str(),
            alt: "",
            path: path.as_str(),
        })
    })
}

/// All inline references followed by all embedded references.
pub fn scan_references(text: &str) -> impl Iterator<Item = ImageReference<'_>> {
    scan_inline(text).chain(scan_embedded(text))
}
