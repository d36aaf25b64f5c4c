//! Types shared between jobs and pipelines

use serde::{Deserialize, Serialize};

/// Compute shape for a single replica
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineSpec {
    pub machine_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accelerator_type: Option<String>,
    #[serde(default)]
    pub accelerator_count: i32,
}

/// Object-storage input: one or more URIs of instance files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSource {
    pub uris: Vec<String>,
}

/// Warehouse-table input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSource {
    pub input_uri: String,
}

/// Object-storage output location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageDestination {
    pub output_uri_prefix: String,
}

/// Warehouse-table output location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDestination {
    pub output_uri: String,
}

/// Error detail attached to a failed or partially failed resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcStatus {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<serde_json::Value>,
}
