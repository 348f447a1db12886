//! Rewrite configuration and its loader.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::asset_paths::HashNaming;

const DEFAULT_CONFIG_FILE: &str = "asset-rewrite.config.json";

/// Chunk name used for the aggregate chunk when `vendorChunkName` is not set.
pub const DEFAULT_COMMON_CHUNK: &str = "common";

/// Which engine rewrites the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteMode {
    /// Parse into a tree and claim one element per emitted asset.
    #[default]
    Strict,
    /// Rewrite matching attribute assignments directly in the text.
    Loose,
}

/// Options applied to emitted script bundles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptOptions {
    /// Filename prefix identifying main bundles in loose mode.
    pub main_file_prefix: String,
    /// Whether emitted filenames carry a trailing hash segment.
    pub use_hash: bool,
    /// Separator between the logical name and the hash segment.
    pub separator: String,
    /// Whether the aggregate (common/vendor) chunk takes part in the rewrite.
    #[serde(alias = "common")]
    pub include_common_chunk: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            main_file_prefix: "main".into(),
            use_hash: false,
            separator: ".".into(),
            include_common_chunk: true,
        }
    }
}

impl ScriptOptions {
    /// Hash layout of emitted script filenames.
    pub fn naming(&self) -> HashNaming<'_> {
        HashNaming {
            use_hash: self.use_hash,
            separator: &self.separator,
        }
    }
}

/// Options applied to emitted stylesheets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleOptions {
    /// Filename prefix identifying main stylesheets in loose mode.
    pub main_file_prefix: String,
    /// Whether emitted filenames carry a trailing hash segment.
    pub use_hash: bool,
    /// Separator between the logical name and the hash segment.
    pub separator: String,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            main_file_prefix: "main".into(),
            use_hash: false,
            separator: ".".into(),
        }
    }
}

impl StyleOptions {
    /// Hash layout of emitted stylesheet filenames.
    pub fn naming(&self) -> HashNaming<'_> {
        HashNaming {
            use_hash: self.use_hash,
            separator: &self.separator,
        }
    }
}

/// Complete configuration for one rewrite invocation.
///
/// Every field is optional when deserialising; missing values come from [`Default`] and
/// unknown keys are ignored so build tool option objects can be passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewriteConfig {
    /// Engine selection.
    pub mode: RewriteMode,
    /// Script bundle options.
    pub js: ScriptOptions,
    /// Stylesheet options.
    #[serde(alias = "css")]
    pub style: StyleOptions,
    /// Name of the aggregate chunk, `common` when unset.
    pub vendor_chunk_name: Option<String>,
    /// Append `?t=<epoch millis>` to every rewritten URL.
    pub url_timestamp: bool,
    /// String prepended to every rewritten URL.
    pub url_prefix: Option<String>,
}

impl RewriteConfig {
    /// Load configuration from `dir`, falling back to defaults when no file is present.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if !candidate.is_file() {
            return Ok(Self::default());
        }
        Self::from_path(&candidate)
    }

    /// Read configuration from a JSON or YAML file, chosen by extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

        if is_yaml {
            serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse YAML config {}", path.display()))
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse JSON config {}", path.display()))
        }
    }

    /// Name of the aggregate chunk looked up in the manifest.
    pub fn common_chunk_name(&self) -> &str {
        self.vendor_chunk_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_COMMON_CHUNK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_follow_documented_values() {
        let config = RewriteConfig::default();
        assert_eq!(config.mode, RewriteMode::Strict);
        assert_eq!(config.js.main_file_prefix, "main");
        assert!(!config.js.use_hash);
        assert_eq!(config.js.separator, ".");
        assert!(config.js.include_common_chunk);
        assert_eq!(config.style.separator, ".");
        assert!(!config.url_timestamp);
        assert!(config.url_prefix.is_none());
        assert_eq!(config.common_chunk_name(), "common");
    }

    #[test]
    fn partial_json_overrides_named_fields_only() {
        let config: RewriteConfig = serde_json::from_str(
            r#"{ "mode": "loose", "js": { "useHash": true }, "css": { "separator": "-" }, "unknown": 1 }"#,
        )
        .unwrap();

        assert_eq!(config.mode, RewriteMode::Loose);
        assert!(config.js.use_hash);
        assert_eq!(config.js.main_file_prefix, "main");
        assert_eq!(config.style.separator, "-");
        assert!(!config.style.use_hash);
    }

    #[test]
    fn accepts_legacy_common_flag() {
        let config: RewriteConfig =
            serde_json::from_str(r#"{ "js": { "common": false } }"#).unwrap();
        assert!(!config.js.include_common_chunk);
    }

    #[test]
    fn vendor_chunk_name_overrides_common() {
        let config = RewriteConfig {
            vendor_chunk_name: Some("vendor".into()),
            ..RewriteConfig::default()
        };
        assert_eq!(config.common_chunk_name(), "vendor");
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = RewriteConfig::discover(dir.path()).unwrap();
        assert_eq!(config, RewriteConfig::default());
    }

    #[test]
    fn loads_yaml_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rewrite.yaml");
        fs::write(&path, "urlTimestamp: true\nurlPrefix: https://cdn.example.com/\n").unwrap();

        let config = RewriteConfig::from_path(&path).unwrap();
        assert!(config.url_timestamp);
        assert_eq!(config.url_prefix.as_deref(), Some("https://cdn.example.com/"));
    }

    #[test]
    fn reports_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        let err = RewriteConfig::discover(dir.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON config"));
    }
}
