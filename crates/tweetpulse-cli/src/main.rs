use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod collect;
mod score;

#[derive(Debug, Parser)]
#[command(name = "tweetpulse")]
#[command(about = "Collect social posts and score their sentiment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline: search, normalize, score, write the dataset.
    Collect {
        /// Search query; defaults to TWEETPULSE_QUERY.
        #[arg(long)]
        query: Option<String>,
        /// Maximum posts to collect; defaults to TWEETPULSE_MAX_RESULTS.
        #[arg(long)]
        max_results: Option<u32>,
        /// Output CSV path; defaults to TWEETPULSE_OUTPUT_PATH.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Score one text and print the verdict without touching any dataset.
    Score {
        /// Raw text to score.
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = tweetpulse_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Collect {
            query,
            max_results,
            output,
        } => collect::run(&config, query, max_results, output).await,
        Commands::Score { text } => score::run(&config, &text).await,
    }
}
