//! Resource name helpers
//!
//! The platform addresses every resource with a path-style name rooted at a
//! project/location parent. These helpers build those paths and qualify bare
//! IDs against a parent.

/// Parent path for all resources in a project/location
pub fn parent(project: &str, location: &str) -> String {
    format!("projects/{}/locations/{}", project, location)
}

/// Full resource name of a batch prediction job
pub fn batch_prediction_job_name(project: &str, location: &str, job_id: &str) -> String {
    format!("{}/batchPredictionJobs/{}", parent(project, location), job_id)
}

/// Full resource name of a training pipeline
pub fn training_pipeline_name(project: &str, location: &str, pipeline_id: &str) -> String {
    format!("{}/trainingPipelines/{}", parent(project, location), pipeline_id)
}

/// Last path segment of a resource name (the bare ID)
pub fn resource_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
