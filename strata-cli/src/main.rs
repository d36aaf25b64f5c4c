//! Strata CLI
//!
//! Command-line interface for the Strata managed ML platform: submit batch
//! prediction jobs and training pipelines, inspect them, and wait for state
//! transitions.

mod commands;
mod config;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Strata ML Platform CLI", long_about = None)]
struct Cli {
    /// Regional API endpoint
    #[arg(
        long,
        env = "STRATA_API_ENDPOINT",
        default_value = "https://us-central1.api.strata.example"
    )]
    api_endpoint: String,

    /// Project the resources live in
    #[arg(long, env = "STRATA_PROJECT")]
    project: String,

    /// Region of the resources
    #[arg(long, env = "STRATA_LOCATION", default_value = "us-central1")]
    location: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strata_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_endpoint: cli.api_endpoint,
        project: cli.project,
        location: cli.location,
    };

    handle_command(cli.command, &config).await
}
