//! Configuration module
//!
//! Holds the endpoint and project/location scope every command operates in.

use strata_core::name;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Regional API endpoint (e.g. "https://us-central1.api.strata.example")
    pub api_endpoint: String,
    /// Project the resources live in
    pub project: String,
    /// Region of the resources
    pub location: String,
}

impl Config {
    /// Parent path scoping every resource this invocation touches
    pub fn parent(&self) -> String {
        name::parent(&self.project, &self.location)
    }
}
