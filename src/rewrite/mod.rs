//! Orchestrates one rewrite of a rendered HTML document.

pub mod loose;
pub mod strict;

use chrono::Utc;
use tracing::info;

use crate::asset_paths::UrlDecorator;
use crate::config::{RewriteConfig, RewriteMode};
use crate::document::Document;
use crate::error::RewriteError;
use crate::manifest::AssetManifest;
use crate::models::{AssetKind, RewrittenAsset};

/// Result of a rewrite together with what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Rewritten document text.
    pub html: String,
    /// Elements rewritten by the strict engine, in script then stylesheet order.
    pub rewritten: Vec<RewrittenAsset>,
    /// Number of text substitutions made by the loose engine.
    pub substitutions: usize,
}

/// Rewrites asset references under a fixed configuration.
///
/// Holds no per-document state, so one rewriter can serve any number of documents,
/// including from several threads.
#[derive(Debug, Clone, Default)]
pub struct AssetRewriter {
    config: RewriteConfig,
}

impl AssetRewriter {
    /// Create a rewriter for `config`.
    pub fn new(config: RewriteConfig) -> Self {
        Self { config }
    }

    /// Rewrite `html` against `manifest`, returning only the new text.
    pub fn rewrite(&self, html: &str, manifest: &AssetManifest) -> Result<String, RewriteError> {
        self.rewrite_outcome(html, manifest).map(|outcome| outcome.html)
    }

    /// Rewrite `html`, sampling the clock once when timestamps are enabled.
    pub fn rewrite_outcome(
        &self,
        html: &str,
        manifest: &AssetManifest,
    ) -> Result<RewriteOutcome, RewriteError> {
        let now = if self.config.url_timestamp {
            Utc::now().timestamp_millis()
        } else {
            0
        };
        self.rewrite_at(html, manifest, now)
    }

    /// Rewrite `html` using `now_millis` as the cache-busting value.
    pub fn rewrite_at(
        &self,
        html: &str,
        manifest: &AssetManifest,
        now_millis: i64,
    ) -> Result<RewriteOutcome, RewriteError> {
        let config = &self.config;
        let decorator = UrlDecorator::new(
            config.url_prefix.as_deref(),
            config.url_timestamp.then_some(now_millis),
        );

        let outcome = match config.mode {
            RewriteMode::Strict => rewrite_strict(html, manifest, config, &decorator)?,
            RewriteMode::Loose => {
                let (html, substitutions) = loose::rewrite_loose(html, manifest, config, &decorator)?;
                RewriteOutcome {
                    html,
                    rewritten: Vec::new(),
                    substitutions,
                }
            }
        };

        info!(
            mode = ?config.mode,
            rewritten = outcome.rewritten.len(),
            substitutions = outcome.substitutions,
            timestamp = ?decorator.timestamp(),
            "asset references rewritten"
        );
        Ok(outcome)
    }
}

/// Rewrite `html` with `config`.
pub fn rewrite(
    html: &str,
    manifest: &AssetManifest,
    config: &RewriteConfig,
) -> Result<String, RewriteError> {
    AssetRewriter::new(config.clone()).rewrite(html, manifest)
}

fn rewrite_strict(
    html: &str,
    manifest: &AssetManifest,
    config: &RewriteConfig,
    decorator: &UrlDecorator,
) -> Result<RewriteOutcome, RewriteError> {
    let document = Document::parse(html)?;

    let mut rewritten = strict::match_candidates(
        AssetKind::Script,
        document.candidates(AssetKind::Script),
        &manifest.script_entries(config),
        config.js.naming(),
        decorator,
    );
    rewritten.extend(strict::match_candidates(
        AssetKind::Style,
        document.candidates(AssetKind::Style),
        &manifest.style_entries(),
        config.style.naming(),
        decorator,
    ));

    // Serializing an untouched tree would only normalise the markup.
    let html = if rewritten.is_empty() {
        html.to_string()
    } else {
        document.serialize()?
    };

    Ok(RewriteOutcome {
        html,
        rewritten,
        substitutions: 0,
    })
}
