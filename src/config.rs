//! Run configuration describing where images go and which references are eligible.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// File name looked up in the scan root by [`LocalizerConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "md-image-localizer.json";

/// Path fragment of the folder Typora uses for pasted images on Windows.
pub const TYPORA_CACHE_MARKER: &str = "AppData/Roaming/Typora/typora-user-images";

/// Discoverable configuration for a localizer run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizerConfig {
    /// Name of the flat image folder created at the scan root.
    pub image_dir_name: String,
    /// Extension (without dot) identifying Markdown documents.
    pub markdown_extension: String,
    /// Extension appended to a document path to form its backup sibling.
    pub backup_extension: String,
    /// Substrings identifying external image caches. Either separator matches.
    pub cache_markers: Vec<String>,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            image_dir_name: "image".into(),
            markdown_extension: "md".into(),
            backup_extension: "bak".into(),
            cache_markers: vec![TYPORA_CACHE_MARKER.into()],
        }
    }
}

impl LocalizerConfig {
    /// Load configuration from the scan root, falling back to defaults.
    ///
    /// A missing file is silent; a file that exists but cannot be parsed is logged and
    /// ignored so the run still proceeds with the stock layout.
    pub fn discover(root: &Path) -> Self {
        let candidate = root.join(DEFAULT_CONFIG_FILE);
        if !candidate.is_file() {
            return Self::default();
        }
        match Self::from_path(&candidate) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %candidate.display(), error = %err, "ignoring invalid config file");
                Self::default()
            }
        }
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Add a marker unless an equivalent one is already configured.
    pub fn add_marker(&mut self, marker: &str) {
        let normalised = marker.replace('\\', "/");
        if normalised.is_empty() {
            return;
        }
        if !self
            .cache_markers
            .iter()
            .any(|existing| existing.replace('\\', "/") == normalised)
        {
            self.cache_markers.push(normalised);
        }
    }

    /// Absolute location of the image folder for a scan root.
    pub fn image_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.image_dir_name)
    }

    /// Backup sibling path for a document, e.g. `notes.md` -> `notes.md.bak`.
    pub fn backup_path(&self, document: &Path) -> PathBuf {
        let mut name = document.as_os_str().to_os_string();
        name.push(".");
        name.push(&self.backup_extension);
        PathBuf::from(name)
    }

    /// Whether a path names a Markdown document under this configuration.
    pub fn is_markdown(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.markdown_extension.as_str())
    }
}
