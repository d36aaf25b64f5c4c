//! Training pipeline request/response bodies

use serde::{Deserialize, Serialize};

use crate::domain::common::MachineSpec;
use crate::domain::pipeline::{ModelToUpload, TrainingPipeline};

/// Schema identifier for the custom-job training task
pub const CUSTOM_TASK_DEFINITION: &str = "schema/trainingjob/definition/custom_task_1.0.0";

/// Request to create a new training pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrainingPipeline {
    pub display_name: String,
    pub training_task_definition: String,
    /// Task inputs matching the schema named by `training_task_definition`
    pub training_task_inputs: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_to_upload: Option<ModelToUpload>,
}

/// Typed inputs for the custom-job training task
///
/// Built by callers and converted to the opaque JSON document the request
/// carries; the platform validates it against the task schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomJobInputs {
    pub worker_pool_specs: Vec<WorkerPoolSpec>,
    pub base_output_directory: OutputDirectory,
}

impl CustomJobInputs {
    /// Convert to the opaque value carried in `training_task_inputs`
    pub fn to_value(&self) -> serde_json::Value {
        // Serialization of these plain structs cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// One worker pool of the training job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerPoolSpec {
    pub machine_spec: MachineSpec,
    pub replica_count: i64,
    pub container_spec: ContainerSpec,
}

/// Training container to run in each replica
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub image_uri: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// Where the training job writes its artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDirectory {
    pub output_uri_prefix: String,
}

/// List envelope for training pipelines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTrainingPipelinesResponse {
    #[serde(default)]
    pub training_pipelines: Vec<TrainingPipeline>,
}
