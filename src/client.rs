use bon::Builder;
use core::fmt;

use crate::{
    error::GlikRequestError,
    file::FileUploadRequest,
    internal::{Endpoint, GlikRequestHelper, HttpMethod},
    request::Rating,
    response::ApiResponse,
};

/// Default API root.
const BASE_URL: &str = "https://api.glik.ai/v1";

const PARAMETERS_URL: &str = "parameters";
const META_URL: &str = "meta";
const FILE_UPLOAD_URL: &str = "files/upload";
const TEXT_TO_AUDIO_URL: &str = "text-to-audio";

/// Core Glik client: credentials plus the endpoints every app type shares.
///
/// Credentials are immutable after construction and the struct is cheap to
/// clone, so one client can be shared across tasks freely. The specialized
/// facades ([`crate::GlikChat`], [`crate::GlikCompletion`],
/// [`crate::GlikWorkflow`], [`crate::GlikDatasets`]) all deref into this
/// type.
#[derive(Clone, Default, Builder)]
pub struct Glik {
    #[builder(into)]
    pub(crate) api_key: String,
    #[builder(default)]
    pub(crate) client: reqwest::Client,
    #[builder(default = BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
}

impl Glik {
    /// Create a new client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Read the API key from the `GLIK_API_KEY` environment variable.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var("GLIK_API_KEY")?;
        Ok(Self::builder().api_key(api_key).build())
    }

    /// API key this client authenticates with.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL for the API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create request plumbing for internal use
    pub(crate) fn request_helper(&self) -> GlikRequestHelper {
        GlikRequestHelper::new(self.client.clone(), &self.base_url, &self.api_key)
    }

    /// Fetch the application's configured parameters (input form, opening
    /// statement, upload limits).
    pub async fn get_application_parameters(
        &self,
        user: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(PARAMETERS_URL, HttpMethod::Get)
            .with_query_params(vec![("user".to_string(), user.to_string())]);

        self.request_helper().send(&endpoint, None::<&()>).await
    }

    /// Fetch app metadata (tool icons).
    pub async fn get_meta(&self, user: &str) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(META_URL, HttpMethod::Get)
            .with_query_params(vec![("user".to_string(), user.to_string())]);

        self.request_helper().send(&endpoint, None::<&()>).await
    }

    /// Rate an answer. `None` revokes a previous rating.
    pub async fn message_feedback(
        &self,
        message_id: &str,
        rating: Option<Rating>,
        user: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!("messages/{message_id}/feedbacks"),
            HttpMethod::Post,
        );
        let body = serde_json::json!({ "rating": rating, "user": user });

        self.request_helper().send(&endpoint, Some(&body)).await
    }

    /// Upload a file for later reference from a message
    /// ([`crate::FileDescriptor::image_upload`]).
    pub async fn file_upload(
        &self,
        user: &str,
        file: &FileUploadRequest,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(FILE_UPLOAD_URL, HttpMethod::Post);
        let form = reqwest::multipart::Form::new()
            .text("user", user.to_string())
            .part("file", file.to_part()?);

        self.request_helper().send_multipart(&endpoint, form).await
    }

    /// Synthesize speech for a piece of text.
    pub async fn text_to_audio(
        &self,
        text: &str,
        user: &str,
        streaming: bool,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(TEXT_TO_AUDIO_URL, HttpMethod::Post);
        let body = serde_json::json!({ "text": text, "user": user, "streaming": streaming });

        self.request_helper().send(&endpoint, Some(&body)).await
    }
}

impl fmt::Debug for Glik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glik")
            .field("api_key", &"[REDACTED]")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
