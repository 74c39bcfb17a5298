#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use anyhow::Context;
use clap::{Parser, Subcommand};

use cardmill_anki::AnkiClient;
use cardmill_config::Config;
use cardmill_core::{
    CardSink, ExtractionPipeline, MatcherDef, default_key_transforms, default_value_transforms,
};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "cardmill")]
#[command(about = "Sync definition annotations from notes into Anki", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract pairs from note files and upsert them into Anki
    Sync {
        /// File paths; one argument may hold several newline-separated paths
        files: Vec<String>,
    },
    /// Extract pairs and print them as JSON lines, without syncing
    Extract {
        /// File paths; one argument may hold several newline-separated paths
        files: Vec<String>,

        /// Skip key/value normalization
        #[arg(long)]
        raw: bool,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Sync { files } => run_sync(&resolve_files(&files)).await?,
        Commands::Extract { files, raw } => run_extract(&resolve_files(&files), raw).await?,
        Commands::Init => Config::create_config()?,
        Commands::Version => println!("cardmill {}", env!("CARGO_PKG_VERSION")),
    }

    Ok(())
}

/// Flatten CLI arguments into one path list.
///
/// The wrapping editor hook passes a single newline-joined argument; plain
/// per-path arguments work the same way. Blank lines are skipped.
fn resolve_files(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Build the pipeline from configuration, falling back to the built-in
/// matcher when none are configured. Transform chains are fixed.
fn build_pipeline(config: &Config) -> anyhow::Result<ExtractionPipeline> {
    if config.parser.matchers.is_empty() {
        return Ok(ExtractionPipeline::with_defaults()?);
    }

    let matchers = config
        .parser
        .matchers
        .iter()
        .map(MatcherDef::build)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExtractionPipeline::new(
        matchers,
        default_key_transforms(),
        default_value_transforms(),
    )?)
}

async fn run_sync(paths: &[String]) -> anyhow::Result<()> {
    if paths.is_empty() {
        anyhow::bail!("No files to sync");
    }

    let config = Config::load()?;
    info!("Loaded config from ~/cardmill/config.json");

    let pipeline = build_pipeline(&config)?;
    let anki = AnkiClient::new().with_base_url(config.anki.url.clone());

    anki.ensure_deck_exists(&config.sync.deck).await?;

    for path in paths {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {path}"))?;

        let pairs = pipeline.parse(&text);
        info!("{path}: extracted {} pairs", pairs.len());

        for pair in &pairs {
            anki.upsert(&config.sync.deck, pair).await?;
        }
    }

    Ok(())
}

async fn run_extract(paths: &[String], raw: bool) -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        debug!("Falling back to default config: {e}");
        Config::default()
    });
    let pipeline = build_pipeline(&config)?;

    for path in paths {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {path}"))?;

        let pairs = if raw {
            pipeline.parse_raw(&text)
        } else {
            pipeline.parse(&text)
        };

        for pair in &pairs {
            println!("{}", serde_json::to_string(pair)?);
        }
    }

    Ok(())
}
