//! Text based engine rewriting attribute assignments with generated patterns.
//!
//! Unlike the strict engine every occurrence of a reference is rewritten, and the
//! aggregate chunk is substituted wherever its filename appears in the text.

use regex::{Captures, Regex};
use tracing::debug;

use crate::asset_paths::{HashNaming, MainBundleFilter, UrlDecorator};
use crate::config::RewriteConfig;
use crate::manifest::AssetManifest;
use crate::models::AssetKind;

/// Rewrite `html` as text, returning the new text and the number of substitutions made.
pub fn rewrite_loose(
    html: &str,
    manifest: &AssetManifest,
    config: &RewriteConfig,
    decorator: &UrlDecorator,
) -> Result<(String, usize), regex::Error> {
    let chunk_name = config.common_chunk_name();
    let mut text = html.to_string();
    let mut substitutions = 0;

    if let Some(entry) = manifest.common_chunk(config) {
        substitutions += replace_chunk_references(&mut text, chunk_name, &decorator.decorate(entry))?;
    }

    let script_filter = MainBundleFilter::new(
        &[config.js.main_file_prefix.as_str(), chunk_name],
        AssetKind::Script,
    )?;
    for path in &manifest.js {
        substitutions += rewrite_references(
            &mut text,
            path,
            AssetKind::Script,
            &script_filter,
            config.js.naming(),
            decorator,
        )?;
    }

    let style_filter =
        MainBundleFilter::new(&[config.style.main_file_prefix.as_str()], AssetKind::Style)?;
    for path in &manifest.css {
        substitutions += rewrite_references(
            &mut text,
            path,
            AssetKind::Style,
            &style_filter,
            config.style.naming(),
            decorator,
        )?;
    }

    Ok((text, substitutions))
}

fn replace_chunk_references(
    text: &mut String,
    chunk_name: &str,
    url: &str,
) -> Result<usize, regex::Error> {
    let pattern = Regex::new(&format!(r"[./0-9A-Za-z_]*{}\.js", regex::escape(chunk_name)))?;
    let mut hits = 0;
    let replaced = pattern
        .replace_all(text.as_str(), |_: &Captures| {
            hits += 1;
            url.to_string()
        })
        .into_owned();
    *text = replaced;
    debug!(chunk = chunk_name, hits, "replaced aggregate chunk references");
    Ok(hits)
}

fn rewrite_references(
    text: &mut String,
    path: &str,
    kind: AssetKind,
    filter: &MainBundleFilter,
    naming: HashNaming<'_>,
    decorator: &UrlDecorator,
) -> Result<usize, regex::Error> {
    if !filter.is_main_bundle(path) {
        debug!(asset = path, "not a main bundle, skipping");
        return Ok(0);
    }
    let Some(origin) = naming.origin_name(path) else {
        return Ok(0);
    };

    let extension = kind.extension();
    let stem = origin
        .strip_suffix(&format!(".{extension}"))
        .unwrap_or(&origin);
    let target = reference_pattern(stem, extension)?;
    let url = decorator.decorate(path);

    let mut hits = 0;
    let replaced = target
        .replace_all(text.as_str(), |caps: &Captures| {
            hits += 1;
            format!(r#"{}="{}""#, &caps["attr"], url)
        })
        .into_owned();
    *text = replaced;

    debug!(asset = path, %origin, hits, "rewrote references");
    Ok(hits)
}

/// `src`/`href` assignment whose quoted value ends in `<stem>.<extension>`.
///
/// Anything before the stem must be ASCII word characters, dots or slashes. The quote
/// characters are paired through an alternation since the pattern engine has no
/// back-references.
fn reference_pattern(stem: &str, extension: &str) -> Result<Regex, regex::Error> {
    let stem = regex::escape(stem);
    let extension = regex::escape(extension);
    Regex::new(&format!(
        r#"(?P<attr>src|href)\s*=\s*(?:"[./0-9A-Za-z_]*{stem}\.{extension}"|'[./0-9A-Za-z_]*{stem}\.{extension}')"#
    ))
}
