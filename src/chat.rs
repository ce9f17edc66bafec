use derive_more::Deref;
use futures_util::stream::BoxStream;

use crate::{
    client::Glik,
    error::GlikRequestError,
    file::FileUploadRequest,
    internal::{Endpoint, HttpMethod},
    request::{ChatRequest, ResponseMode},
    response::{ApiResponse, StreamEvent},
};

const CHAT_MESSAGES_URL: &str = "chat-messages";
const CONVERSATIONS_URL: &str = "conversations";
const MESSAGES_URL: &str = "messages";
const AUDIO_TO_TEXT_URL: &str = "audio-to-text";

/// Facade for multi-turn chat apps.
///
/// Conversation continuity lives on the service side: pass the
/// `conversation_id` from an earlier answer to continue a thread. Derefs
/// into [`Glik`] for the shared endpoints.
#[derive(Clone, Debug, Deref)]
pub struct GlikChat {
    #[deref]
    core: Glik,
}

impl From<Glik> for GlikChat {
    fn from(core: Glik) -> Self {
        Self { core }
    }
}

impl GlikChat {
    /// Create a new chat client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Glik::new(api_key).into()
    }

    /// Read the API key from the `GLIK_API_KEY` environment variable.
    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        Ok(Glik::load_from_env()?.into())
    }

    /// Create a chat message and return the raw response.
    ///
    /// The response is handed back exactly as the service produced it; use
    /// [`ApiResponse::error_for_status`] and [`ApiResponse::json`] (or
    /// [`ApiResponse::events`] for streaming mode) to interpret it.
    pub async fn create_chat_message(
        &self,
        request: &ChatRequest,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(CHAT_MESSAGES_URL, HttpMethod::Post);

        self.core.request_helper().send(&endpoint, Some(request)).await
    }

    /// Create a chat message in streaming mode and decode the events.
    ///
    /// Forces `response_mode` to streaming on a copy of the request.
    pub fn stream_chat_message(
        &self,
        request: &ChatRequest,
    ) -> BoxStream<'static, Result<StreamEvent, GlikRequestError>> {
        let mut request = request.clone();
        request.response_mode = ResponseMode::Streaming;

        let endpoint = Endpoint::new(CHAT_MESSAGES_URL, HttpMethod::Post);

        self.core.request_helper().stream(&endpoint, Some(&request))
    }

    /// Fetch suggested follow-up questions for an answered message.
    pub async fn get_suggested(
        &self,
        message_id: &str,
        user: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!("{MESSAGES_URL}/{message_id}/suggested"),
            HttpMethod::Get,
        )
        .with_query_params(vec![("user".to_string(), user.to_string())]);

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }

    /// Stop an in-flight generation task.
    pub async fn stop_message(
        &self,
        task_id: &str,
        user: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!("{CHAT_MESSAGES_URL}/{task_id}/stop"),
            HttpMethod::Post,
        );
        let body = serde_json::json!({ "user": user });

        self.core.request_helper().send(&endpoint, Some(&body)).await
    }

    /// List the user's conversations, newest first.
    pub async fn get_conversations(
        &self,
        user: &str,
        last_id: Option<&str>,
        limit: Option<u32>,
        pinned: Option<bool>,
    ) -> Result<ApiResponse, GlikRequestError> {
        let mut query_params = vec![("user".to_string(), user.to_string())];
        if let Some(last_id) = last_id {
            query_params.push(("last_id".to_string(), last_id.to_string()));
        }
        if let Some(limit) = limit {
            query_params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(pinned) = pinned {
            query_params.push(("pinned".to_string(), pinned.to_string()));
        }

        let endpoint =
            Endpoint::new(CONVERSATIONS_URL, HttpMethod::Get).with_query_params(query_params);

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }

    /// List the messages of a conversation, oldest first.
    pub async fn get_conversation_messages(
        &self,
        user: &str,
        conversation_id: Option<&str>,
        first_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<ApiResponse, GlikRequestError> {
        let mut query_params = vec![("user".to_string(), user.to_string())];
        if let Some(conversation_id) = conversation_id {
            query_params.push(("conversation_id".to_string(), conversation_id.to_string()));
        }
        if let Some(first_id) = first_id {
            query_params.push(("first_id".to_string(), first_id.to_string()));
        }
        if let Some(limit) = limit {
            query_params.push(("limit".to_string(), limit.to_string()));
        }

        let endpoint = Endpoint::new(MESSAGES_URL, HttpMethod::Get).with_query_params(query_params);

        self.core.request_helper().send(&endpoint, None::<&()>).await
    }

    /// Rename a conversation, or let the service pick a name when
    /// `auto_generate` is set.
    pub async fn rename_conversation(
        &self,
        conversation_id: &str,
        name: &str,
        auto_generate: bool,
        user: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!("{CONVERSATIONS_URL}/{conversation_id}/name"),
            HttpMethod::Post,
        );
        let body =
            serde_json::json!({ "name": name, "auto_generate": auto_generate, "user": user });

        self.core.request_helper().send(&endpoint, Some(&body)).await
    }

    /// Delete a conversation.
    pub async fn delete_conversation(
        &self,
        conversation_id: &str,
        user: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(
            format!("{CONVERSATIONS_URL}/{conversation_id}"),
            HttpMethod::Delete,
        );
        let body = serde_json::json!({ "user": user });

        self.core.request_helper().send(&endpoint, Some(&body)).await
    }

    /// Transcribe an audio recording.
    pub async fn audio_to_text(
        &self,
        file: &FileUploadRequest,
        user: &str,
    ) -> Result<ApiResponse, GlikRequestError> {
        let endpoint = Endpoint::new(AUDIO_TO_TEXT_URL, HttpMethod::Post);
        let form = reqwest::multipart::Form::new()
            .text("user", user.to_string())
            .part("audio_file", file.to_part()?);

        self.core.request_helper().send_multipart(&endpoint, form).await
    }
}
