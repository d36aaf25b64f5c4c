//! Common types used across CLI modules

use strata_core::name;

use crate::config::Config;

/// Identifier that can be either a full resource name or a bare ID
///
/// Users can pass the ID segment alone and have it qualified against the
/// configured project/location, or paste a full resource name as-is.
#[derive(Debug, Clone)]
pub enum ResourceRef {
    /// Full path-style resource name
    Full(String),
    /// Bare ID, to be qualified against the configured parent
    Id(String),
}

impl ResourceRef {
    /// Parse a string into a ResourceRef
    ///
    /// Anything containing a path separator is treated as a full name.
    pub fn parse(input: &str) -> Self {
        if input.contains('/') {
            ResourceRef::Full(input.to_string())
        } else {
            ResourceRef::Id(input.to_string())
        }
    }

    /// Resolve to a full batch prediction job name
    pub fn job_name(&self, config: &Config) -> String {
        match self {
            ResourceRef::Full(name) => name.clone(),
            ResourceRef::Id(id) => {
                name::batch_prediction_job_name(&config.project, &config.location, id)
            }
        }
    }

    /// Resolve to a full training pipeline name
    pub fn pipeline_name(&self, config: &Config) -> String {
        match self {
            ResourceRef::Full(name) => name.clone(),
            ResourceRef::Id(id) => {
                name::training_pipeline_name(&config.project, &config.location, id)
            }
        }
    }
}

impl From<&str> for ResourceRef {
    fn from(s: &str) -> Self {
        ResourceRef::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            api_endpoint: "https://us-central1.api.strata.example".to_string(),
            project: "acme".to_string(),
            location: "us-central1".to_string(),
        }
    }

    #[test]
    fn test_bare_id_is_qualified() {
        let r = ResourceRef::parse("123");
        assert_eq!(
            r.job_name(&config()),
            "projects/acme/locations/us-central1/batchPredictionJobs/123"
        );
        assert_eq!(
            r.pipeline_name(&config()),
            "projects/acme/locations/us-central1/trainingPipelines/123"
        );
    }

    #[test]
    fn test_full_name_passes_through() {
        let full = "projects/other/locations/eu-west4/batchPredictionJobs/9";
        let r = ResourceRef::parse(full);
        assert_eq!(r.job_name(&config()), full);
    }
}
