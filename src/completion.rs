use derive_more::Deref;
use futures_util::stream::BoxStream;

use crate::{
    client::Glik,
    error::GlikRequestError,
    internal::{Endpoint, HttpMethod},
    request::{CompletionRequest, ResponseMode},
    response::{ApiResponse, StreamEvent},
};

const COMPLETION_MESSAGES_URL: &str = "completion-messages";

/// Facade for single-turn completion apps.
///
/// Derefs into [`Glik`], so the shared endpoints (parameters, file upload,
/// feedback) are available directly on this type.
#[derive(Clone, Debug, Deref)]
pub struct GlikCompletion {
    #[deref]
    core: Glik,
}

impl From<Glik> for GlikCompletion {
    fn from(core: Glik) -> Self {
        Self { core }
    }
}

impl GlikCompletion {
    /// Create a new completion client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Glik::new(api_key).into()
    }

    /// Read the API key from the `GLIK_API_KEY` environment variable.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        Ok(Glik::load_from_env()?.into())
    }

    /// Create a completion message and return the raw response.
    ///
    /// The response is handed back exactly as the service produced it; use
    /// [`ApiResponse::error_for_status`] and [`ApiResponse::json`] (or
    /// [`ApiResponse::events`] for streaming mode) to interpret it.
    pub async fn create_completion_message(
        &self,
        request: &CompletionRequest,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(COMPLETION_MESSAGES_URL, HttpMethod::Post);

        self.core.request_helper().send(&endpoint, Some(request)).await
    }

    /// Create a completion message in streaming mode and decode the events.
    ///
    /// Forces `response_mode` to streaming on a copy of the request.
    pub fn stream_completion_message(
        &self,
        request: &CompletionRequest,
    ) -> BoxStream<'static, Result<StreamEvent, GlikRequestError>> {
        let mut request = request.clone();
        request.response_mode = ResponseMode::Streaming;

        let endpoint = Endpoint::new(COMPLETION_MESSAGES_URL, HttpMethod::Post);

        self.core.request_helper().stream(&endpoint, Some(&request))
    }
}
