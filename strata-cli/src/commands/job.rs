//! Batch prediction job command handlers
//!
//! Each subcommand is one remote call: build the request from the flags,
//! invoke it, print every field of the response.

use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use strata_client::{PlatformClient, PollOptions};
use strata_core::domain::common::{MachineSpec, StorageDestination, StorageSource};
use strata_core::domain::job::{
    BatchPredictionJob, DedicatedResources, InputConfig, JobState, OutputConfig,
};
use strata_core::dto::job::CreateBatchPredictionJob;

use crate::config::Config;
use crate::types::ResourceRef;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Submit a new batch prediction job
    Create {
        /// Display name (defaults to a generated unique name)
        #[arg(long)]
        display_name: Option<String>,

        /// Model ID or full model resource name
        #[arg(long)]
        model: String,

        /// Storage URI of the instance file to predict on
        #[arg(long)]
        source_uri: String,

        /// Storage URI prefix the predictions are written under
        #[arg(long)]
        destination_prefix: String,

        /// Format of the input instances
        #[arg(long, default_value = "jsonl")]
        instances_format: String,

        /// Format of the written predictions
        #[arg(long, default_value = "csv")]
        predictions_format: String,

        /// Minimum confidence for a prediction to be kept
        #[arg(long, default_value_t = 0.0)]
        confidence_threshold: f64,

        /// Machine type for dedicated resources (platform-chosen if unset)
        #[arg(long)]
        machine_type: Option<String>,

        /// Accelerator type attached to each replica
        #[arg(long)]
        accelerator_type: Option<String>,

        /// Accelerators per replica
        #[arg(long, default_value_t = 0)]
        accelerator_count: i32,

        /// Replicas the job starts with
        #[arg(long, default_value_t = 1)]
        starting_replica_count: i32,

        /// Replica ceiling the job may scale to
        #[arg(long, default_value_t = 1)]
        max_replica_count: i32,
    },
    /// List jobs in the configured project/location
    List,
    /// Get job details
    Get {
        /// Job ID or full resource name
        id: String,
    },
    /// Request cancellation of a job
    Cancel {
        /// Job ID or full resource name
        id: String,
    },
    /// Delete a job (must be in a terminal state)
    Delete {
        /// Job ID or full resource name
        id: String,
    },
    /// Poll a job until it reaches a target state
    Wait {
        /// Job ID or full resource name
        id: String,

        /// State to wait for
        #[arg(long, default_value = "CANCELLED", value_parser = parse_job_state)]
        target: JobState,

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

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = PlatformClient::new(&config.api_endpoint);

    match command {
        JobCommands::Create {
            display_name,
            model,
            source_uri,
            destination_prefix,
            instances_format,
            predictions_format,
            confidence_threshold,
            machine_type,
            accelerator_type,
            accelerator_count,
            starting_replica_count,
            max_replica_count,
        } => {
            let display_name = display_name
                .unwrap_or_else(|| format!("batch_prediction_job_{}", uuid::Uuid::new_v4()));

            let model = match ResourceRef::parse(&model) {
                ResourceRef::Full(name) => name,
                ResourceRef::Id(id) => format!("{}/models/{}", config.parent(), id),
            };

            let dedicated_resources = machine_type.map(|machine_type| DedicatedResources {
                machine_spec: MachineSpec {
                    machine_type,
                    accelerator_type,
                    accelerator_count,
                },
                starting_replica_count,
                max_replica_count,
            });

            let req = CreateBatchPredictionJob {
                display_name,
                model,
                model_parameters: Some(serde_json::json!({
                    "confidenceThreshold": confidence_threshold,
                })),
                input_config: InputConfig {
                    instances_format,
                    storage_source: Some(StorageSource {
                        uris: vec![source_uri],
                    }),
                    table_source: None,
                },
                output_config: OutputConfig {
                    predictions_format,
                    storage_destination: Some(StorageDestination {
                        output_uri_prefix: destination_prefix,
                    }),
                    table_destination: None,
                },
                dedicated_resources,
                generate_explanation: false,
                labels: Default::default(),
            };

            let job = client
                .create_batch_prediction_job(&config.parent(), req)
                .await?;

            println!("{}", "response:".bold());
            print_job_details(&job);
            Ok(())
        }
        JobCommands::List => {
            let jobs = client.list_batch_prediction_jobs(&config.parent()).await?;

            if jobs.is_empty() {
                println!("{}", "No jobs found.".yellow());
            } else {
                println!("{}", format!("Found {} job(s):", jobs.len()).bold());
                println!();
                for job in jobs {
                    print_job_summary(&job);
                }
            }
            Ok(())
        }
        JobCommands::Get { id } => {
            let name = ResourceRef::parse(&id).job_name(config);
            let job = client.get_batch_prediction_job(&name).await?;
            print_job_details(&job);
            Ok(())
        }
        JobCommands::Cancel { id } => {
            let name = ResourceRef::parse(&id).job_name(config);
            client.cancel_batch_prediction_job(&name).await?;
            println!("{} Cancellation requested for {}", "✓".green(), name);
            Ok(())
        }
        JobCommands::Delete { id } => {
            let name = ResourceRef::parse(&id).job_name(config);
            client.delete_batch_prediction_job(&name).await?;
            println!("{} Deleted {}", "✓".green(), name);
            Ok(())
        }
        JobCommands::Wait {
            id,
            target,
            interval,
            max_attempts,
            deadline,
        } => {
            let name = ResourceRef::parse(&id).job_name(config);
            let options = PollOptions {
                interval: Duration::from_secs(interval),
                max_attempts,
                deadline: deadline.map(Duration::from_secs),
            };

            println!("Waiting for {} to reach {}...", name.dimmed(), target);
            let job = client.wait_for_job_state(&name, target, &options).await?;

            println!("{} Job reached {}", "✓".green(), colorize_job_state(&job.state));
            print_job_details(&job);
            Ok(())
        }
    }
}

/// Accepts the wire form, case-insensitively
fn parse_job_state(input: &str) -> Result<JobState, String> {
    serde_json::from_value(serde_json::Value::String(input.to_uppercase()))
        .map_err(|_| format!("unknown job state '{}'", input))
}

/// Print a one-entry job summary
fn print_job_summary(job: &BatchPredictionJob) {
    println!("  {} {}", "▸".cyan(), job.name.dimmed());
    println!("    Display name: {}", job.display_name);
    println!("    State:        {}", colorize_job_state(&job.state));
    println!(
        "    Created:      {}",
        job.create_time
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Print every field of a job, mirroring the response structure
fn print_job_details(job: &BatchPredictionJob) {
    println!("  name: {}", job.name.cyan());
    println!("  display_name: {}", job.display_name);
    println!("  model: {}", job.model);
    if let Some(params) = &job.model_parameters {
        println!("  model_parameters: {}", params);
    }
    println!("  generate_explanation: {}", job.generate_explanation);
    println!("  state: {}", colorize_job_state(&job.state));
    println!("  create_time: {}", job.create_time);
    if let Some(t) = job.start_time {
        println!("  start_time: {}", t);
    }
    if let Some(t) = job.end_time {
        println!("  end_time: {}", t);
    }
    if let Some(t) = job.update_time {
        println!("  update_time: {}", t);
    }
    if !job.labels.is_empty() {
        println!("  labels:");
        for (key, value) in &job.labels {
            println!("    {} = {}", key.cyan(), value);
        }
    }

    println!("  input_config:");
    println!("    instances_format: {}", job.input_config.instances_format);
    if let Some(source) = &job.input_config.storage_source {
        println!("    storage_source:");
        println!("      uris: {:?}", source.uris);
    }
    if let Some(source) = &job.input_config.table_source {
        println!("    table_source:");
        println!("      input_uri: {}", source.input_uri);
    }

    println!("  output_config:");
    println!(
        "    predictions_format: {}",
        job.output_config.predictions_format
    );
    if let Some(dest) = &job.output_config.storage_destination {
        println!("    storage_destination:");
        println!("      output_uri_prefix: {}", dest.output_uri_prefix);
    }
    if let Some(dest) = &job.output_config.table_destination {
        println!("    table_destination:");
        println!("      output_uri: {}", dest.output_uri);
    }

    if let Some(resources) = &job.dedicated_resources {
        println!("  dedicated_resources:");
        println!(
            "    starting_replica_count: {}",
            resources.starting_replica_count
        );
        println!("    max_replica_count: {}", resources.max_replica_count);
        println!("    machine_spec:");
        println!("      machine_type: {}", resources.machine_spec.machine_type);
        if let Some(accel) = &resources.machine_spec.accelerator_type {
            println!("      accelerator_type: {}", accel);
            println!(
                "      accelerator_count: {}",
                resources.machine_spec.accelerator_count
            );
        }
    }

    if let Some(tuning) = &job.manual_batch_tuning_parameters {
        println!("  manual_batch_tuning_parameters:");
        println!("    batch_size: {}", tuning.batch_size);
    }

    if let Some(info) = &job.output_info {
        println!("  output_info:");
        if let Some(dir) = &info.output_directory {
            println!("    output_directory: {}", dir);
        }
        if let Some(dataset) = &info.output_dataset {
            println!("    output_dataset: {}", dataset);
        }
    }

    if let Some(error) = &job.error {
        println!("  error:");
        println!("    code: {}", error.code);
        println!("    message: {}", error.message.red());
    }
    for failure in &job.partial_failures {
        println!("  partial_failure:");
        println!("    code: {}", failure.code);
        println!("    message: {}", failure.message.red());
    }

    if let Some(consumed) = &job.resources_consumed {
        println!("  resources_consumed:");
        println!("    replica_hours: {}", consumed.replica_hours);
    }
    if let Some(stats) = &job.completion_stats {
        println!("  completion_stats:");
        println!("    successful_count: {}", stats.successful_count);
        println!("    failed_count: {}", stats.failed_count);
        println!("    incomplete_count: {}", stats.incomplete_count);
    }
}

/// Colorize job state for display
fn colorize_job_state(state: &JobState) -> colored::ColoredString {
    let state_str = state.to_string();
    match state {
        JobState::Queued | JobState::Pending => state_str.yellow(),
        JobState::Running | JobState::Cancelling => state_str.cyan(),
        JobState::Succeeded => state_str.green(),
        JobState::Failed | JobState::Expired => state_str.red(),
        JobState::Cancelled | JobState::Paused | JobState::Unspecified => state_str.dimmed(),
    }
}
