//! Training pipeline types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::common::RpcStatus;

/// Training pipeline resource
///
/// An asynchronous model-training run. The task inputs are an opaque JSON
/// document whose schema is selected by `training_task_definition`; the
/// platform interprets it, this crate does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPipeline {
    /// Server-assigned resource name
    /// (`projects/{project}/locations/{location}/trainingPipelines/{id}`)
    pub name: String,
    pub display_name: String,
    /// Identifier of the training task schema (e.g. the custom-job task)
    pub training_task_definition: String,
    pub training_task_inputs: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_task_metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_to_upload: Option<ModelToUpload>,
    pub state: PipelineState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcStatus>,
    pub create_time: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Model the pipeline uploads on success
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelToUpload {
    pub display_name: String,
}

/// Pipeline lifecycle state, as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineState {
    Unspecified,
    Queued,
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelling,
    Cancelled,
    Paused,
}

impl PipelineState {
    /// Whether the pipeline will never transition again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Cancelled)
    }
}

impl std::fmt::Display for PipelineState {
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
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_format() {
        assert_eq!(
            serde_json::to_string(&PipelineState::Cancelling).unwrap(),
            "\"CANCELLING\""
        );
        let state: PipelineState = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(state, PipelineState::Cancelled);
    }

    #[test]
    fn test_terminal_states() {
        assert!(PipelineState::Succeeded.is_terminal());
        assert!(PipelineState::Failed.is_terminal());
        assert!(PipelineState::Cancelled.is_terminal());

        assert!(!PipelineState::Cancelling.is_terminal());
        assert!(!PipelineState::Running.is_terminal());
        assert!(!PipelineState::Paused.is_terminal());
    }
}
