use crate::{
    error::{self, GlikRequestError},
    streaming,
    usage::Usage,
};
use chrono::{DateTime, Utc};
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Raw HTTP response handed back by every facade method.
///
/// The service's reply is returned unmodified: no status check has happened
/// and the body has not been read. Status-based error raising is the
/// explicit [`error_for_status`](Self::error_for_status) opt-in; the body is
/// consumed through exactly one of the lazy accessors ([`json`](Self::json),
/// [`text`](Self::text), [`bytes`](Self::bytes)) or, for streaming-mode
/// calls, iterated with [`events`](Self::events).
#[derive(Debug)]
pub struct ApiResponse {
    /// The untouched transport response.
    inner: reqwest::Response,
}

impl From<reqwest::Response> for ApiResponse {
    fn from(inner: reqwest::Response) -> Self {
        Self { inner }
    }
}

impl ApiResponse {
    /// HTTP status code of the response.
    pub fn status(&self) -> reqwest::StatusCode {
        self.inner.status()
    }

    /// Response headers.
    pub fn headers(&self) -> &reqwest::header::HeaderMap {
        self.inner.headers()
    }

    /// Turn a non-success status into [`GlikRequestError::Api`], reading the
    /// body for the service's error message. Success statuses pass through
    /// untouched.
    pub async fn error_for_status(self) -> Result<Self, GlikRequestError> {
        let status = self.inner.status();

        if status.is_success() {
            Ok(self)
        } else {
            let bytes = self.inner.bytes().await?;
            Err(error::parse_error_response(status, bytes))
        }
    }

    /// Buffer the body and decode it as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, GlikRequestError> {
        let bytes = self.inner.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Buffer the body as text.
    pub async fn text(self) -> Result<String, GlikRequestError> {
        Ok(self.inner.text().await?)
    }

    /// Buffer the body as raw bytes (audio, file downloads).
    pub async fn bytes(self) -> Result<bytes::Bytes, GlikRequestError> {
        Ok(self.inner.bytes().await?)
    }

    /// Consume the body incrementally as a stream of decoded events.
    ///
    /// One event per non-blank line; a malformed line surfaces as an error
    /// from the stream. Use [`StreamEvent`] or `serde_json::Value` as the
    /// event type.
    pub fn events<T>(self) -> BoxStream<'static, Result<T, GlikRequestError>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        streaming::event_stream(self.inner)
    }

    /// Unwrap the underlying transport response.
    pub fn into_inner(self) -> reqwest::Response {
        self.inner
    }
}

/// One decoded event from a streaming-mode response.
///
/// The event shape is owned by the service; the fields below are the common
/// envelope and everything else lands in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    /// Event kind, e.g. `message`, `message_end`, `ping`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    /// Answer fragment carried by `message` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Remaining event payload.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Blocking-mode body of a completion or chat message call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Present for chat messages, absent for completion messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Usage and retrieval metadata attached to a blocking answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retriever_resources: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One conversation summary from `GET /conversations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Page of conversations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationsResponse {
    pub data: Vec<Conversation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// One message from a conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub inputs: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_files: Option<Value>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Page of conversation messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub data: Vec<ConversationMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Application configuration from `GET /parameters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input_form: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_upload: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a successful `POST /files/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUploadResponse {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Value>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Suggested follow-up questions for a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedQuestionsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default)]
    pub data: Vec<String>,
}

/// Generic `{"result": "success"}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultResponse {
    pub result: String,
}

/// App metadata from `GET /meta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaResponse {
    #[serde(default)]
    pub tool_icons: Map<String, Value>,
}

/// Blocking-mode body of `POST /workflows/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRunResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<WorkflowRunData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Execution record of a workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRunData {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    /// `running`, `succeeded`, `failed` or `stopped`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
