//! Training pipeline endpoints

use crate::PlatformClient;
use crate::error::Result;
use crate::wait::{PollOptions, WaitError, WaitOutcome, poll_until};
use strata_core::domain::pipeline::{PipelineState, TrainingPipeline};
use strata_core::dto::pipeline::{CreateTrainingPipeline, ListTrainingPipelinesResponse};

impl PlatformClient {
    // =============================================================================
    // Pipeline Lifecycle
    // =============================================================================

    /// Create a new training pipeline
    ///
    /// # Arguments
    /// * `parent` - The project/location parent path
    ///   (`projects/{project}/locations/{location}`)
    /// * `req` - The pipeline creation request
    ///
    /// # Returns
    /// The created pipeline, in its initial (non-terminal) state
    pub async fn create_training_pipeline(
        &self,
        parent: &str,
        req: CreateTrainingPipeline,
    ) -> Result<TrainingPipeline> {
        let url = format!("{}/v1/{}/trainingPipelines", self.base_url, parent);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Get a training pipeline by resource name
    ///
    /// # Arguments
    /// * `name` - The full pipeline resource name
    pub async fn get_training_pipeline(&self, name: &str) -> Result<TrainingPipeline> {
        let url = format!("{}/v1/{}", self.base_url, name);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// List all training pipelines under a parent
    ///
    /// # Arguments
    /// * `parent` - The project/location parent path
    pub async fn list_training_pipelines(&self, parent: &str) -> Result<Vec<TrainingPipeline>> {
        let url = format!("{}/v1/{}/trainingPipelines", self.base_url, parent);
        let response = self.client.get(&url).send().await?;

        let list: ListTrainingPipelinesResponse = self.handle_response(response).await?;
        Ok(list.training_pipelines)
    }

    /// Request cancellation of a training pipeline
    ///
    /// Cancellation is asynchronous; poll with
    /// [`wait_for_pipeline_state`](Self::wait_for_pipeline_state) before
    /// deleting.
    ///
    /// # Arguments
    /// * `name` - The full pipeline resource name
    pub async fn cancel_training_pipeline(&self, name: &str) -> Result<()> {
        let url = format!("{}/v1/{}:cancel", self.base_url, name);
        let response = self.client.post(&url).send().await?;

        self.handle_empty_response(response).await
    }

    /// Delete a training pipeline
    ///
    /// # Arguments
    /// * `name` - The full pipeline resource name
    pub async fn delete_training_pipeline(&self, name: &str) -> Result<()> {
        let url = format!("{}/v1/{}", self.base_url, name);
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // State Waiting
    // =============================================================================

    /// Block until a pipeline reaches the target state
    ///
    /// # Arguments
    /// * `name` - The full pipeline resource name
    /// * `target` - The state to wait for (usually terminal)
    /// * `options` - Polling interval and bounds
    pub async fn wait_for_pipeline_state(
        &self,
        name: &str,
        target: PipelineState,
        options: &PollOptions,
    ) -> std::result::Result<TrainingPipeline, WaitError> {
        let outcome = poll_until(
            || self.get_training_pipeline(name),
            |pipeline: &TrainingPipeline| pipeline.state == target,
            options,
        )
        .await?;

        match outcome {
            WaitOutcome::Matched { value, attempts } => {
                tracing::debug!(
                    "Pipeline {} reached {} after {} attempt(s)",
                    name,
                    target,
                    attempts
                );
                Ok(value)
            }
            WaitOutcome::TimedOut { attempts, last } => Err(WaitError::TimedOut {
                attempts,
                last_state: last.map(|pipeline| pipeline.state.to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use strata_core::domain::common::MachineSpec;
    use strata_core::dto::pipeline::{
        CUSTOM_TASK_DEFINITION, ContainerSpec, CustomJobInputs, OutputDirectory, WorkerPoolSpec,
    };

    fn pipeline_json(name: &str, state: &str) -> String {
        format!(
            r#"{{
                "name": "{name}",
                "display_name": "temp_custom_job_training",
                "training_task_definition": "{CUSTOM_TASK_DEFINITION}",
                "training_task_inputs": {{}},
                "state": "{state}",
                "create_time": "2024-01-01T00:00:00Z"
            }}"#
        )
    }

    fn create_request() -> CreateTrainingPipeline {
        let inputs = CustomJobInputs {
            worker_pool_specs: vec![WorkerPoolSpec {
                machine_spec: MachineSpec {
                    machine_type: "n1-standard-4".to_string(),
                    accelerator_type: None,
                    accelerator_count: 0,
                },
                replica_count: 1,
                container_spec: ContainerSpec {
                    image_uri: "registry.example/mnist-custom-job:latest".to_string(),
                    command: vec![],
                    args: vec![],
                },
            }],
            base_output_directory: OutputDirectory {
                output_uri_prefix: "st://samples/training_pipeline_output".to_string(),
            },
        };

        CreateTrainingPipeline {
            display_name: "temp_custom_job_training".to_string(),
            training_task_definition: CUSTOM_TASK_DEFINITION.to_string(),
            training_task_inputs: inputs.to_value(),
            model_to_upload: None,
        }
    }

    #[tokio::test]
    async fn test_create_training_pipeline() {
        let mut server = mockito::Server::new_async().await;
        let name = "projects/acme/locations/us-central1/trainingPipelines/789";

        let mock = server
            .mock(
                "POST",
                "/v1/projects/acme/locations/us-central1/trainingPipelines",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(pipeline_json(name, "PENDING"))
            .create_async()
            .await;

        let client = PlatformClient::new(server.url());
        let pipeline = client
            .create_training_pipeline("projects/acme/locations/us-central1", create_request())
            .await
            .unwrap();

        assert_eq!(pipeline.name, name);
        assert_eq!(pipeline.state, PipelineState::Pending);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_training_pipelines() {
        let mut server = mockito::Server::new_async().await;
        let name = "projects/acme/locations/us-central1/trainingPipelines/789";

        let _mock = server
            .mock(
                "GET",
                "/v1/projects/acme/locations/us-central1/trainingPipelines",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{ "training_pipelines": [{}] }}"#,
                pipeline_json(name, "RUNNING")
            ))
            .create_async()
            .await;

        let client = PlatformClient::new(server.url());
        let pipelines = client
            .list_training_pipelines("projects/acme/locations/us-central1")
            .await
            .unwrap();

        assert_eq!(pipelines.len(), 1);
        assert_eq!(pipelines[0].name, name);
    }

    /// Fixture-teardown sequence: cancel, wait until CANCELLED, then delete.
    /// The wait keeps the delete from racing a pipeline still mid-transition.
    #[tokio::test]
    async fn test_cancel_wait_delete_sequence() {
        let mut server = mockito::Server::new_async().await;
        let name = "projects/acme/locations/us-central1/trainingPipelines/789";

        let cancel = server
            .mock("POST", format!("/v1/{}:cancel", name).as_str())
            .with_status(200)
            .create_async()
            .await;

        // CANCELLING twice, then CANCELLED
        let calls = Arc::new(AtomicUsize::new(0));
        let body_calls = Arc::clone(&calls);
        let pipeline_name = name.to_string();
        let get = server
            .mock("GET", format!("/v1/{}", name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| {
                let state = match body_calls.fetch_add(1, Ordering::SeqCst) {
                    0 | 1 => "CANCELLING",
                    _ => "CANCELLED",
                };
                pipeline_json(&pipeline_name, state).into_bytes()
            })
            .expect(3)
            .create_async()
            .await;

        let delete = server
            .mock("DELETE", format!("/v1/{}", name).as_str())
            .with_status(200)
            .create_async()
            .await;

        let client = PlatformClient::new(server.url());
        let options = PollOptions {
            interval: Duration::ZERO,
            max_attempts: 10,
            deadline: None,
        };

        client.cancel_training_pipeline(name).await.unwrap();
        let pipeline = client
            .wait_for_pipeline_state(name, PipelineState::Cancelled, &options)
            .await
            .unwrap();
        assert_eq!(pipeline.state, PipelineState::Cancelled);
        client.delete_training_pipeline(name).await.unwrap();

        cancel.assert_async().await;
        get.assert_async().await;
        delete.assert_async().await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_wait_timeout_reports_last_state() {
        let mut server = mockito::Server::new_async().await;
        let name = "projects/acme/locations/us-central1/trainingPipelines/789";

        let _mock = server
            .mock("GET", format!("/v1/{}", name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(pipeline_json(name, "RUNNING"))
            .expect(3)
            .create_async()
            .await;

        let client = PlatformClient::new(server.url());
        let options = PollOptions {
            interval: Duration::ZERO,
            max_attempts: 3,
            deadline: None,
        };

        let err = client
            .wait_for_pipeline_state(name, PipelineState::Cancelled, &options)
            .await
            .unwrap_err();

        match err {
            WaitError::TimedOut {
                attempts,
                last_state,
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_state.as_deref(), Some("RUNNING"));
            }
            WaitError::Client(e) => panic!("expected a timeout, got {e}"),
        }
    }
}
