use derive_more::Deref;
use futures_util::stream::BoxStream;

use crate::{
    client::Glik,
    error::GlikRequestError,
    internal::{Endpoint, HttpMethod},
    request::{ResponseMode, WorkflowRunRequest},
    response::{ApiResponse, StreamEvent},
};

const WORKFLOWS_RUN_URL: &str = "workflows/run";
const WORKFLOWS_TASKS_URL: &str = "workflows/tasks";

/// Facade for workflow apps.
#[derive(Clone, Debug, Deref)]
pub struct GlikWorkflow {
    #[deref]
    core: Glik,
}

impl From<Glik> for GlikWorkflow {
    fn from(core: Glik) -> Self {
        Self { core }
    }
}

impl GlikWorkflow {
    /// Create a new workflow client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Glik::new(api_key).into()
    }

    /// Read the API key from the `GLIK_API_KEY` environment variable.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        Ok(Glik::load_from_env()?.into())
    }

    /// Run the workflow and return the raw response.
    pub async fn run(
        &self,
        request: &WorkflowRunRequest,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(WORKFLOWS_RUN_URL, HttpMethod::Post);

        self.core.request_helper().send(&endpoint, Some(request)).await
    }

    /// Run the workflow in streaming mode and decode the node events.
    pub fn stream_run(
        &self,
        request: &WorkflowRunRequest,
    ) -> BoxStream<'static, Result<StreamEvent, GlikRequestError>> {
        let mut request = request.clone();
        request.response_mode = ResponseMode::Streaming;

        let endpoint = Endpoint::new(WORKFLOWS_RUN_URL, HttpMethod::Post);

        self.core.request_helper().stream(&endpoint, Some(&request))
    }

    /// Stop an in-flight workflow task.
    pub async fn stop(&self, task_id: &str, user: &str) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!("{WORKFLOWS_TASKS_URL}/{task_id}/stop"),
            HttpMethod::Post,
        );
        let body = serde_json::json!({ "user": user });

        self.core.request_helper().send(&endpoint, Some(&body)).await
    }

    /// Fetch the execution record of a finished run.
    pub async fn get_result(
        &self,
        workflow_run_id: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!("{WORKFLOWS_RUN_URL}/{workflow_run_id}"),
            HttpMethod::Get,
        );

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }
}
