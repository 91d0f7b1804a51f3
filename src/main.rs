use anyhow::{Context, Result};
use clap::Parser;
use simcheck::profile::Profiler;
use simcheck::storage::write_result;
use simcheck::{SimilarityConfig, SimilarityEngine};
use std::path::PathBuf;
use tracing::{info, warn};

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Text overlap checker using TF-IDF cosine similarity", long_about = None)]
struct Args {
    /// Original document
    original: PathBuf,

    /// Document to check against the original
    candidate: PathBuf,

    /// File that receives the score, formatted with two decimals
    output: PathBuf,

    /// Write stage timings as JSON to this file
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Print the full comparison report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("simcheck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = SimilarityConfig::from_env().context("Failed to load configuration")?;
    let engine = SimilarityEngine::new(config).context("Failed to build similarity engine")?;

    let mut profiler = Profiler::new();
    let comparison = engine
        .compare_files(&args.original, &args.candidate, &mut profiler)
        .context("Similarity check failed")?;

    // Report before writing so the score survives a failed write
    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("similarity: {}", comparison.score);
    }

    let written = profiler.time("write", || write_result(&args.output, comparison.score));

    if let Some(path) = &args.profile {
        if profiler.save(path) {
            info!("profile saved to {}", path.display());
        } else {
            warn!("continuing without a profile report");
        }
    }

    written.context("Failed to save result")?;
    if !args.json {
        println!("result written to: {}", args.output.display());
    }

    Ok(())
}
