//! Loading and interpreting the emitted asset manifest.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::RewriteConfig;
use crate::models::AssetEntry;

/// Emitted assets as reported by the build tool.
///
/// The order of `js` and `css` is match priority: earlier entries claim markup first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetManifest {
  /// Emitted script paths.
  #[serde(default)]
  pub js: Vec<String>,
  /// Emitted stylesheet paths.
  #[serde(default)]
  pub css: Vec<String>,
  /// Named output chunks carrying a literal entry path.
  #[serde(default)]
  pub chunks: BTreeMap<String, ChunkEntry>,
}

/// Output chunk entry contained within the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChunkEntry {
  /// Literal emitted path of the chunk.
  #[serde(default)]
  pub entry: String,
}

/// Load an asset manifest from disk.
pub fn load_manifest(path: &Path) -> Result<AssetManifest> {
  let content = fs::read_to_string(path)
    .with_context(|| format!("manifest not found at {}", path.display()))?;
  let manifest: AssetManifest =
    serde_json::from_str(&content).context("failed to parse asset manifest JSON")?;
  Ok(manifest)
}

impl AssetManifest {
  /// Entry path of the aggregate chunk, when the configuration includes it.
  pub fn common_chunk(&self, config: &RewriteConfig) -> Option<&str> {
    if !config.js.include_common_chunk {
      return None;
    }
    self
      .chunks
      .get(config.common_chunk_name())
      .map(|chunk| chunk.entry.as_str())
      .filter(|entry| !entry.is_empty())
  }

  /// Script entries in match order, with the aggregate chunk appended last when enabled.
  pub fn script_entries(&self, config: &RewriteConfig) -> Vec<AssetEntry> {
    let mut entries: Vec<AssetEntry> = self.js.iter().map(AssetEntry::script).collect();
    if let Some(entry) = self.common_chunk(config) {
      entries.push(AssetEntry::script(entry));
    }
    entries
  }

  /// Stylesheet entries in match order.
  pub fn style_entries(&self) -> Vec<AssetEntry> {
    self.css.iter().map(AssetEntry::style).collect()
  }
}
