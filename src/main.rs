use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use asset_url_rewriter::{AssetRewriter, RewriteConfig, RewriteMode, load_manifest};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "asset-rewrite",
    about = "Point script and stylesheet references in rendered HTML at hashed bundle names"
)]
struct Cli {
    /// Rendered HTML document to rewrite.
    #[arg(long)]
    html: PathBuf,
    /// JSON asset manifest emitted by the build.
    #[arg(long)]
    manifest: PathBuf,
    /// JSON or YAML configuration file. Defaults to `asset-rewrite.config.json` next to the
    /// HTML document when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the result here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Override the configured engine.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Override the configured URL prefix.
    #[arg(long)]
    url_prefix: Option<String>,
    /// Append a cache-busting timestamp to rewritten URLs.
    #[arg(long)]
    url_timestamp: bool,
    /// Log every pairing decision and print the rewritten elements as JSON to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Strict,
    Loose,
}

impl From<ModeArg> for RewriteMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Strict => RewriteMode::Strict,
            ModeArg::Loose => RewriteMode::Loose,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => RewriteConfig::from_path(path)?,
        None => {
            let dir = cli
                .html
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            RewriteConfig::discover(&dir)?
        }
    };
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if let Some(prefix) = cli.url_prefix {
        config.url_prefix = Some(prefix);
    }
    if cli.url_timestamp {
        config.url_timestamp = true;
    }

    let html = fs::read_to_string(&cli.html)
        .with_context(|| format!("failed to read {}", cli.html.display()))?;
    let manifest = load_manifest(&cli.manifest)?;

    let outcome = AssetRewriter::new(config)
        .rewrite_outcome(&html, &manifest)
        .with_context(|| format!("failed to rewrite {}", cli.html.display()))?;

    if cli.verbose {
        let report = serde_json::to_string_pretty(&outcome.rewritten)
            .context("failed to serialize rewrite report")?;
        eprintln!("{report}");
    }

    match &cli.output {
        Some(path) => fs::write(path, &outcome.html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", outcome.html),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
