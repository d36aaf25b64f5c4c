//! Batch prediction job endpoints

use crate::PlatformClient;
use crate::error::Result;
use crate::wait::{PollOptions, WaitError, WaitOutcome, poll_until};
use strata_core::domain::job::{BatchPredictionJob, JobState};
use strata_core::dto::job::{CreateBatchPredictionJob, ListBatchPredictionJobsResponse};

impl PlatformClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Create a new batch prediction job
    ///
    /// # Arguments
    /// * `parent` - The project/location parent path
    ///   (`projects/{project}/locations/{location}`)
    /// * `req` - The job creation request
    ///
    /// # Returns
    /// The created job, in its initial (non-terminal) state
    ///
    /// # Example
    /// ```no_run
    /// # use strata_client::PlatformClient;
    /// # use strata_core::dto::job::CreateBatchPredictionJob;
    /// # use strata_core::domain::job::{InputConfig, OutputConfig};
    /// # async fn example() -> strata_client::Result<()> {
    /// let client = PlatformClient::new("https://us-central1.api.strata.example");
    /// let job = client.create_batch_prediction_job(
    ///     "projects/acme/locations/us-central1",
    ///     CreateBatchPredictionJob {
    ///         display_name: "nightly-scoring".to_string(),
    ///         model: "projects/acme/locations/us-central1/models/42".to_string(),
    ///         model_parameters: None,
    ///         input_config: InputConfig::default(),
    ///         output_config: OutputConfig::default(),
    ///         dedicated_resources: None,
    ///         generate_explanation: false,
    ///         labels: Default::default(),
    ///     },
    /// ).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_batch_prediction_job(
        &self,
        parent: &str,
        req: CreateBatchPredictionJob,
    ) -> Result<BatchPredictionJob> {
        let url = format!("{}/v1/{}/batchPredictionJobs", self.base_url, parent);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Get a batch prediction job by resource name
    ///
    /// # Arguments
    /// * `name` - The full job resource name
    pub async fn get_batch_prediction_job(&self, name: &str) -> Result<BatchPredictionJob> {
        let url = format!("{}/v1/{}", self.base_url, name);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// List all batch prediction jobs under a parent
    ///
    /// # Arguments
    /// * `parent` - The project/location parent path
    pub async fn list_batch_prediction_jobs(
        &self,
        parent: &str,
    ) -> Result<Vec<BatchPredictionJob>> {
        let url = format!("{}/v1/{}/batchPredictionJobs", self.base_url, parent);
        let response = self.client.get(&url).send().await?;

        let list: ListBatchPredictionJobsResponse = self.handle_response(response).await?;
        Ok(list.batch_prediction_jobs)
    }

    /// Request cancellation of a batch prediction job
    ///
    /// Cancellation is asynchronous: the job moves through CANCELLING before
    /// reaching CANCELLED. Use [`wait_for_job_state`](Self::wait_for_job_state)
    /// to block until it lands.
    ///
    /// # Arguments
    /// * `name` - The full job resource name
    pub async fn cancel_batch_prediction_job(&self, name: &str) -> Result<()> {
        let url = format!("{}/v1/{}:cancel", self.base_url, name);
        let response = self.client.post(&url).send().await?;

        self.handle_empty_response(response).await
    }

    /// Delete a batch prediction job
    ///
    /// The platform rejects deletion of jobs still mid-transition.
    ///
    /// # Arguments
    /// * `name` - The full job resource name
    pub async fn delete_batch_prediction_job(&self, name: &str) -> Result<()> {
        let url = format!("{}/v1/{}", self.base_url, name);
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // State Waiting
    // =============================================================================

    /// Block until a job reaches the target state
    ///
    /// Polls the job at the configured interval, returning the job as first
    /// observed in the target state. Gives up with [`WaitError::TimedOut`]
    /// once the options' attempt or deadline bound is hit.
    ///
    /// # Arguments
    /// * `name` - The full job resource name
    /// * `target` - The state to wait for (usually terminal)
    /// * `options` - Polling interval and bounds
    pub async fn wait_for_job_state(
        &self,
        name: &str,
        target: JobState,
        options: &PollOptions,
    ) -> std::result::Result<BatchPredictionJob, WaitError> {
        let outcome = poll_until(
            || self.get_batch_prediction_job(name),
            |job: &BatchPredictionJob| job.state == target,
            options,
        )
        .await?;

        match outcome {
            WaitOutcome::Matched { value, attempts } => {
                tracing::debug!(
                    "Job {} reached {} after {} attempt(s)",
                    name,
                    target,
                    attempts
                );
                Ok(value)
            }
            WaitOutcome::TimedOut { attempts, last } => Err(WaitError::TimedOut {
                attempts,
                last_state: last.map(|job| job.state.to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use strata_core::domain::common::{StorageDestination, StorageSource};
    use strata_core::domain::job::{InputConfig, OutputConfig};

    fn job_json(name: &str, state: &str) -> String {
        format!(
            r#"{{
                "name": "{name}",
                "display_name": "demo",
                "model": "projects/acme/locations/us-central1/models/42",
                "input_config": {{
                    "instances_format": "jsonl",
                    "storage_source": {{ "uris": ["st://bucket/in.jsonl"] }}
                }},
                "output_config": {{
                    "predictions_format": "csv",
                    "storage_destination": {{ "output_uri_prefix": "st://bucket/out/" }}
                }},
                "state": "{state}",
                "create_time": "2024-01-01T00:00:00Z"
            }}"#
        )
    }

    fn create_request() -> CreateBatchPredictionJob {
        CreateBatchPredictionJob {
            display_name: "demo".to_string(),
            model: "projects/acme/locations/us-central1/models/42".to_string(),
            model_parameters: Some(serde_json::json!({ "confidenceThreshold": 0.0 })),
            input_config: InputConfig {
                instances_format: "jsonl".to_string(),
                storage_source: Some(StorageSource {
                    uris: vec!["st://bucket/in.jsonl".to_string()],
                }),
                table_source: None,
            },
            output_config: OutputConfig {
                predictions_format: "csv".to_string(),
                storage_destination: Some(StorageDestination {
                    output_uri_prefix: "st://bucket/out/".to_string(),
                }),
                table_destination: None,
            },
            dedicated_resources: None,
            generate_explanation: false,
            labels: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_create_batch_prediction_job() {
        let mut server = mockito::Server::new_async().await;
        let name = "projects/acme/locations/us-central1/batchPredictionJobs/123";

        let mock = server
            .mock(
                "POST",
                "/v1/projects/acme/locations/us-central1/batchPredictionJobs",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(job_json(name, "PENDING"))
            .create_async()
            .await;

        let client = PlatformClient::new(server.url());
        let job = client
            .create_batch_prediction_job("projects/acme/locations/us-central1", create_request())
            .await
            .unwrap();

        assert_eq!(job.name, name);
        assert_eq!(job.state, JobState::Pending);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_batch_prediction_job() {
        let mut server = mockito::Server::new_async().await;
        let name = "projects/acme/locations/us-central1/batchPredictionJobs/123";

        let mock = server
            .mock("GET", format!("/v1/{}", name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(job_json(name, "RUNNING"))
            .create_async()
            .await;

        let client = PlatformClient::new(server.url());
        let job = client.get_batch_prediction_job(name).await.unwrap();

        assert_eq!(job.state, JobState::Running);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_cancel_and_delete_return_unit() {
        let mut server = mockito::Server::new_async().await;
        let name = "projects/acme/locations/us-central1/batchPredictionJobs/123";

        let cancel = server
            .mock("POST", format!("/v1/{}:cancel", name).as_str())
            .with_status(200)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", format!("/v1/{}", name).as_str())
            .with_status(200)
            .create_async()
            .await;

        let client = PlatformClient::new(server.url());
        client.cancel_batch_prediction_job(name).await.unwrap();
        client.delete_batch_prediction_job(name).await.unwrap();

        cancel.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_surfaces_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let name = "projects/acme/locations/us-central1/batchPredictionJobs/missing";

        let _mock = server
            .mock("GET", format!("/v1/{}", name).as_str())
            .with_status(404)
            .with_body("job not found")
            .create_async()
            .await;

        let client = PlatformClient::new(server.url());
        let err = client.get_batch_prediction_job(name).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("job not found"));
    }

    #[tokio::test]
    async fn test_wait_for_job_state_over_http() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let mut server = mockito::Server::new_async().await;
        let name = "projects/acme/locations/us-central1/batchPredictionJobs/123";

        // Serve PENDING, RUNNING, RUNNING, then CANCELLED
        let calls = Arc::new(AtomicUsize::new(0));
        let body_calls = Arc::clone(&calls);
        let job_name = name.to_string();
        let _mock = server
            .mock("GET", format!("/v1/{}", name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| {
                let state = match body_calls.fetch_add(1, Ordering::SeqCst) {
                    0 => "PENDING",
                    1 | 2 => "RUNNING",
                    _ => "CANCELLED",
                };
                job_json(&job_name, state).into_bytes()
            })
            .expect(4)
            .create_async()
            .await;

        let client = PlatformClient::new(server.url());
        let options = PollOptions {
            interval: Duration::ZERO,
            max_attempts: 10,
            deadline: None,
        };
        let job = client
            .wait_for_job_state(name, JobState::Cancelled, &options)
            .await
            .unwrap();

        assert_eq!(job.state, JobState::Cancelled);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
