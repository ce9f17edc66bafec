use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::file::FileDescriptor;

/// How the service delivers the answer body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// The full body is produced before the response completes.
    #[default]
    Blocking,
    /// The body arrives incrementally as newline-delimited events.
    Streaming,
}

/// End-user verdict on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Like,
    Dislike,
}

/// Request body for `POST /chat-messages`.
///
/// `inputs` is forwarded unvalidated; the service owns the schema. Unknown
/// top-level keys can be smuggled through `extra` for forward compatibility.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct ChatRequest {
    #[builder(field)]
    pub inputs: Map<String, Value>,
    #[builder(field)]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// The end user's message.
    #[builder(into)]
    pub query: String,
    /// Caller-chosen end-user identifier.
    #[builder(into)]
    pub user: String,
    #[builder(default)]
    pub response_mode: ResponseMode,
    /// Continues an existing conversation when set; the service tracks
    /// continuity, the client never does.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileDescriptor>>,
}

impl<S: chat_request_builder::State> ChatRequestBuilder<S> {
    /// Replace the whole `inputs` mapping.
    pub fn inputs(mut self, inputs: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.inputs = inputs.into_iter().collect();
        self
    }

    /// Add one `inputs` entry.
    pub fn input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    /// Add a top-level key the typed surface does not know about.
    pub fn extra_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Request body for `POST /completion-messages`.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct CompletionRequest {
    #[builder(field)]
    pub inputs: Map<String, Value>,
    #[builder(field)]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[builder(into)]
    pub user: String,
    #[builder(default)]
    pub response_mode: ResponseMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileDescriptor>>,
}

impl<S: completion_request_builder::State> CompletionRequestBuilder<S> {
    /// Replace the whole `inputs` mapping.
    pub fn inputs(mut self, inputs: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.inputs = inputs.into_iter().collect();
        self
    }

    /// Add one `inputs` entry.
    pub fn input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    /// Add a top-level key the typed surface does not know about.
    pub fn extra_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Request body for `POST /workflows/run`.
#[derive(Debug, Clone, Serialize, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct WorkflowRunRequest {
    #[builder(field)]
    pub inputs: Map<String, Value>,
    #[builder(into)]
    pub user: String,
    /// Workflows default to streaming delivery.
    #[builder(default = ResponseMode::Streaming)]
    pub response_mode: ResponseMode,
}

impl<S: workflow_run_request_builder::State> WorkflowRunRequestBuilder<S> {
    /// Replace the whole `inputs` mapping.
    pub fn inputs(mut self, inputs: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.inputs = inputs.into_iter().collect();
        self
    }

    /// Add one `inputs` entry.
    pub fn input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }
}
