//! Batch prediction job request/response bodies

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::job::{BatchPredictionJob, DedicatedResources, InputConfig, OutputConfig};

/// Request to create a new batch prediction job
///
/// Everything except `display_name`, `model` and the input/output configs is
/// optional; the platform fills in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBatchPredictionJob {
    pub display_name: String,
    /// Resource name of the model to run
    /// (`projects/{project}/locations/{location}/models/{model_id}`)
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_parameters: Option<serde_json::Value>,
    pub input_config: InputConfig,
    pub output_config: OutputConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedicated_resources: Option<DedicatedResources>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub generate_explanation: bool,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// List envelope for batch prediction jobs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBatchPredictionJobsResponse {
    #[serde(default)]
    pub batch_prediction_jobs: Vec<BatchPredictionJob>,
}

// serde has no built-in skip helper for false booleans
fn is_false(b: &bool) -> bool {
    !*b
}
