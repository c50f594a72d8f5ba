use std::path::Path;

use serde::{Deserialize, Serialize};

/// On-disk representation of a clustering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Line-oriented `label:item item ...` format.
    #[default]
    Text,
    /// Persisted structure as YAML.
    Yaml,
    /// Persisted structure as JSON.
    Json,
}

impl Format {
    /// Detects the format from a file extension: `.yaml`/`.yml` and `.json`
    /// are persisted structures, anything else is text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Format::Yaml,
            "json" => Format::Json,
            _ => Format::Text,
        }
    }
}

/// Controls how [`Clustering::load`](crate::Clustering::load) reads a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Suppress items that already appear in an earlier cluster, so the
    /// result is a strict partition.
    ///
    /// Without it, text files only de-duplicate the item union and keep
    /// shared items in every cluster that lists them. Persisted dumps are
    /// loaded as-is. Mappings are always filtered by key order.
    #[serde(default)]
    pub clean: bool,

    /// Overrides extension-based format detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl LoadOptions {
    pub fn clean() -> Self {
        Self {
            clean: true,
            format: None,
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub(crate) fn format_for(&self, path: &Path) -> Format {
        self.format.unwrap_or_else(|| Format::from_path(path))
    }
}
