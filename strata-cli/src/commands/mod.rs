//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod pipeline;

pub use job::JobCommands;
pub use pipeline::PipelineCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Batch prediction job management
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Training pipeline management
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Pipeline { command } => pipeline::handle_pipeline_command(command, config).await,
    }
}
