//! Training pipeline command handlers
//!
//! Mirrors the job commands for the platform's other resource kind. `create`
//! builds the custom-job task inputs from flags and submits them as the
//! opaque task document.

use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use strata_client::{PlatformClient, PollOptions};
use strata_core::domain::common::MachineSpec;
use strata_core::domain::pipeline::{ModelToUpload, PipelineState, TrainingPipeline};
use strata_core::dto::pipeline::{
    CUSTOM_TASK_DEFINITION, ContainerSpec, CreateTrainingPipeline, CustomJobInputs,
    OutputDirectory, WorkerPoolSpec,
};

use crate::config::Config;
use crate::types::ResourceRef;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Submit a new custom-job training pipeline
    Create {
        /// Display name (defaults to a generated unique name)
        #[arg(long)]
        display_name: Option<String>,

        /// Display name of the model the pipeline uploads on success
        #[arg(long)]
        model_display_name: Option<String>,

        /// Training container image
        #[arg(long)]
        container_image_uri: String,

        /// Storage URI prefix the training artifacts are written under
        #[arg(long)]
        base_output_directory: String,

        /// Arguments passed to the training container
        #[arg(long)]
        container_args: Vec<String>,

        /// Machine type for each training replica
        #[arg(long, default_value = "n1-standard-4")]
        machine_type: String,

        /// Accelerator type attached to each replica
        #[arg(long)]
        accelerator_type: Option<String>,

        /// Accelerators per replica
        #[arg(long, default_value_t = 0)]
        accelerator_count: i32,

        /// Training replicas
        #[arg(long, default_value_t = 1)]
        replica_count: i64,
    },
    /// List pipelines in the configured project/location
    List,
    /// Get pipeline details
    Get {
        /// Pipeline ID or full resource name
        id: String,
    },
    /// Request cancellation of a pipeline
    Cancel {
        /// Pipeline ID or full resource name
        id: String,
    },
    /// Delete a pipeline (must be in a terminal state)
    Delete {
        /// Pipeline ID or full resource name
        id: String,
    },
    /// Poll a pipeline until it reaches a target state
    Wait {
        /// Pipeline ID or full resource name
        id: String,

        /// State to wait for
        #[arg(long, default_value = "CANCELLED", value_parser = parse_pipeline_state)]
        target: PipelineState,

        /// Seconds between polls
        #[arg(long, default_value_t = 5)]
        interval: u64,

        /// Give up after this many polls
        #[arg(long, default_value_t = 60)]
        max_attempts: u32,

        /// Optional overall deadline in seconds
        #[arg(long)]
        deadline: Option<u64>,
    },
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let client = PlatformClient::new(&config.api_endpoint);

    match command {
        PipelineCommands::Create {
            display_name,
            model_display_name,
            container_image_uri,
            base_output_directory,
            container_args,
            machine_type,
            accelerator_type,
            accelerator_count,
            replica_count,
        } => {
            let display_name = display_name
                .unwrap_or_else(|| format!("training_pipeline_{}", uuid::Uuid::new_v4()));

            let inputs = CustomJobInputs {
                worker_pool_specs: vec![WorkerPoolSpec {
                    machine_spec: MachineSpec {
                        machine_type,
                        accelerator_type,
                        accelerator_count,
                    },
                    replica_count,
                    container_spec: ContainerSpec {
                        image_uri: container_image_uri,
                        command: vec![],
                        args: container_args,
                    },
                }],
                base_output_directory: OutputDirectory {
                    output_uri_prefix: base_output_directory,
                },
            };

            let req = CreateTrainingPipeline {
                display_name,
                training_task_definition: CUSTOM_TASK_DEFINITION.to_string(),
                training_task_inputs: inputs.to_value(),
                model_to_upload: model_display_name
                    .map(|display_name| ModelToUpload { display_name }),
            };

            let pipeline = client
                .create_training_pipeline(&config.parent(), req)
                .await?;

            println!("{}", "response:".bold());
            print_pipeline_details(&pipeline);
            Ok(())
        }
        PipelineCommands::List => {
            let pipelines = client.list_training_pipelines(&config.parent()).await?;

            if pipelines.is_empty() {
                println!("{}", "No pipelines found.".yellow());
            } else {
                println!(
                    "{}",
                    format!("Found {} pipeline(s):", pipelines.len()).bold()
                );
                println!();
                for pipeline in pipelines {
                    print_pipeline_summary(&pipeline);
                }
            }
            Ok(())
        }
        PipelineCommands::Get { id } => {
            let name = ResourceRef::parse(&id).pipeline_name(config);
            let pipeline = client.get_training_pipeline(&name).await?;
            print_pipeline_details(&pipeline);
            Ok(())
        }
        PipelineCommands::Cancel { id } => {
            let name = ResourceRef::parse(&id).pipeline_name(config);
            client.cancel_training_pipeline(&name).await?;
            println!("{} Cancellation requested for {}", "✓".green(), name);
            Ok(())
        }
        PipelineCommands::Delete { id } => {
            let name = ResourceRef::parse(&id).pipeline_name(config);
            client.delete_training_pipeline(&name).await?;
            println!("{} Deleted {}", "✓".green(), name);
            Ok(())
        }
        PipelineCommands::Wait {
            id,
            target,
            interval,
            max_attempts,
            deadline,
        } => {
            let name = ResourceRef::parse(&id).pipeline_name(config);
            let options = PollOptions {
                interval: Duration::from_secs(interval),
                max_attempts,
                deadline: deadline.map(Duration::from_secs),
            };

            println!("Waiting for {} to reach {}...", name.dimmed(), target);
            let pipeline = client
                .wait_for_pipeline_state(&name, target, &options)
                .await?;

            println!(
                "{} Pipeline reached {}",
                "✓".green(),
                colorize_pipeline_state(&pipeline.state)
            );
            print_pipeline_details(&pipeline);
            Ok(())
        }
    }
}

/// Accepts the wire form, case-insensitively
fn parse_pipeline_state(input: &str) -> Result<PipelineState, String> {
    serde_json::from_value(serde_json::Value::String(input.to_uppercase()))
        .map_err(|_| format!("unknown pipeline state '{}'", input))
}

/// Print a one-entry pipeline summary
fn print_pipeline_summary(pipeline: &TrainingPipeline) {
    println!("  {} {}", "▸".cyan(), pipeline.name.dimmed());
    println!("    Display name: {}", pipeline.display_name);
    println!(
        "    State:        {}",
        colorize_pipeline_state(&pipeline.state)
    );
    println!(
        "    Created:      {}",
        pipeline
            .create_time
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Print every field of a pipeline, mirroring the response structure
fn print_pipeline_details(pipeline: &TrainingPipeline) {
    println!("  name: {}", pipeline.name.cyan());
    println!("  display_name: {}", pipeline.display_name);
    println!(
        "  training_task_definition: {}",
        pipeline.training_task_definition
    );
    match serde_json::to_string_pretty(&pipeline.training_task_inputs) {
        Ok(pretty) => println!("  training_task_inputs: {}", pretty),
        Err(_) => println!("  training_task_inputs: {}", pipeline.training_task_inputs),
    }
    if let Some(metadata) = &pipeline.training_task_metadata {
        println!("  training_task_metadata: {}", metadata);
    }
    if let Some(model) = &pipeline.model_to_upload {
        println!("  model_to_upload:");
        println!("    display_name: {}", model.display_name);
    }
    println!("  state: {}", colorize_pipeline_state(&pipeline.state));
    println!("  create_time: {}", pipeline.create_time);
    if let Some(t) = pipeline.start_time {
        println!("  start_time: {}", t);
    }
    if let Some(t) = pipeline.end_time {
        println!("  end_time: {}", t);
    }
    if let Some(t) = pipeline.update_time {
        println!("  update_time: {}", t);
    }
    if !pipeline.labels.is_empty() {
        println!("  labels:");
        for (key, value) in &pipeline.labels {
            println!("    {} = {}", key.cyan(), value);
        }
    }
    if let Some(error) = &pipeline.error {
        println!("  error:");
        println!("    code: {}", error.code);
        println!("    message: {}", error.message.red());
    }
}

/// Colorize pipeline state for display
fn colorize_pipeline_state(state: &PipelineState) -> colored::ColoredString {
    let state_str = state.to_string();
    match state {
        PipelineState::Queued | PipelineState::Pending => state_str.yellow(),
        PipelineState::Running | PipelineState::Cancelling => state_str.cyan(),
        PipelineState::Succeeded => state_str.green(),
        PipelineState::Failed => state_str.red(),
        PipelineState::Cancelled | PipelineState::Paused | PipelineState::Unspecified => {
            state_str.dimmed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pipeline_state() {
        assert_eq!(
            parse_pipeline_state("CANCELLED").unwrap(),
            PipelineState::Cancelled
        );
        assert_eq!(
            parse_pipeline_state("running").unwrap(),
            PipelineState::Running
        );
        assert!(parse_pipeline_state("EXPIRED").is_err());
    }
}
