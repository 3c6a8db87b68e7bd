use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trendscout_core::AppConfig;
use trendscout_youtube::YouTubeClient;

mod daily;
mod output;
mod weekly;

#[derive(Debug, Parser)]
#[command(name = "trendscout")]
#[command(about = "Scouts video candidates and keyword momentum for fixed topic categories")]
struct Cli {
    /// Categories YAML path (overrides TRENDSCOUT_CATEGORIES_PATH).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory (overrides TRENDSCOUT_OUT_DIR).
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run guaranteed top-N candidate selection for every category.
    Daily {
        /// Number of candidates to guarantee per category.
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Rank week-over-week keyword-bucket momentum.
    Weekly,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = trendscout_core::load_app_config().context("loading configuration")?;
    if let Some(path) = cli.config {
        config.categories_path = path;
    }
    if let Some(out) = cli.out {
        config.out_dir = out;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let run_id = uuid::Uuid::new_v4();
    tracing::info!(%run_id, "trendscout run starting");

    let categories = trendscout_core::load_categories(&config.categories_path)
        .context("loading categories config")?;

    match cli.command {
        Commands::Daily { top } => daily::run(&config, &categories, top).await?,
        Commands::Weekly => weekly::run(&config, &categories).await?,
    }

    tracing::info!(%run_id, "trendscout run finished");
    Ok(())
}

/// Builds the API client from process configuration. Credentials are
/// validated before this point; any failure here is a client-construction
/// problem, not a missing secret.
fn build_client(config: &AppConfig) -> anyhow::Result<YouTubeClient> {
    let client = YouTubeClient::new(
        &config.youtube_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.relevance_language,
    )?;
    Ok(client)
}
