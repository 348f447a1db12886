#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod document;
pub mod error;
pub mod manifest;
pub mod models;
pub mod rewrite;

pub use config::{RewriteConfig, RewriteMode, ScriptOptions, StyleOptions};
pub use error::{RewriteError, StructuralError};
pub use manifest::{AssetManifest, ChunkEntry, load_manifest};
pub use models::{AssetEntry, AssetKind, Location, RewrittenAsset};
pub use rewrite::{AssetRewriter, RewriteOutcome, rewrite};
