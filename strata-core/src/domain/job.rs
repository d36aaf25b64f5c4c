//! Batch prediction job types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::common::{
    MachineSpec, RpcStatus, StorageDestination, StorageSource, TableDestination, TableSource,
};

/// Batch prediction job resource
///
/// An asynchronous bulk inference run. Created by the client, driven to a
/// terminal state by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictionJob {
    /// Server-assigned resource name
    /// (`projects/{project}/locations/{location}/batchPredictionJobs/{id}`)
    pub name: String,
    pub display_name: String,
    /// Resource name of the model producing the predictions
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_parameters: Option<serde_json::Value>,
    pub input_config: InputConfig,
    pub output_config: OutputConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedicated_resources: Option<DedicatedResources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_batch_tuning_parameters: Option<ManualBatchTuningParameters>,
    #[serde(default)]
    pub generate_explanation: bool,
    pub state: JobState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partial_failures: Vec<RpcStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources_consumed: Option<ResourcesConsumed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_stats: Option<CompletionStats>,
    pub create_time: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_info: Option<OutputInfo>,
}

/// Job lifecycle state, as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Unspecified,
    Queued,
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelling,
    Cancelled,
    Paused,
    Expired,
}

impl JobState {
    /// Whether the job will never transition again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::Cancelled | Self::Expired
        )
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unspecified => "UNSPECIFIED",
            Self::Queued => "QUEUED",
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Cancelling => "CANCELLING",
            Self::Cancelled => "CANCELLED",
            Self::Paused => "PAUSED",
            Self::Expired => "EXPIRED",
        };
        f.write_str(s)
    }
}

/// Where instances come from and how they are encoded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// e.g. "jsonl"
    pub instances_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_source: Option<StorageSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_source: Option<TableSource>,
}

/// Where predictions go and how they are encoded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// e.g. "csv"
    pub predictions_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_destination: Option<StorageDestination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_destination: Option<TableDestination>,
}

/// Dedicated compute requested for the job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DedicatedResources {
    pub machine_spec: MachineSpec,
    #[serde(default)]
    pub starting_replica_count: i32,
    #[serde(default)]
    pub max_replica_count: i32,
}

/// Manual override of the platform's batch sizing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualBatchTuningParameters {
    pub batch_size: i32,
}

/// Compute consumed so far, filled in by the platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcesConsumed {
    #[serde(default)]
    pub replica_hours: f64,
}

/// Per-instance completion counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionStats {
    #[serde(default)]
    pub successful_count: i64,
    #[serde(default)]
    pub failed_count: i64,
    #[serde(default)]
    pub incomplete_count: i64,
}

/// Where the platform actually wrote the predictions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dataset: Option<String>,
}
