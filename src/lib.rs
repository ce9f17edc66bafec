#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Async client for the Glik AI application API: completion and chat
//! messages (blocking or streamed), file uploads, conversation management,
//! workflows, and knowledge-base datasets.

pub mod chat;
pub mod client;
pub mod completion;
pub mod datasets;
pub mod error;
pub mod file;
mod internal;
pub mod request;
pub mod response;
pub mod streaming;
pub mod usage;
pub mod workflow;

// Re-export main types
pub use chat::GlikChat;
pub use client::Glik;
pub use completion::GlikCompletion;
pub use datasets::{GlikDatasets, ProcessRule, SegmentInput};
pub use error::GlikRequestError;
pub use file::{FileDescriptor, FileKind, FileSource, FileUploadRequest};
pub use request::{ChatRequest, CompletionRequest, Rating, ResponseMode, WorkflowRunRequest};
pub use response::{
    ApiResponse, AppParameters, ChatCompletionResponse, Conversation, ConversationMessage,
    ConversationsResponse, FileUploadResponse, MessagesResponse, MetaResponse, ResultResponse,
    StreamEvent, SuggestedQuestionsResponse, WorkflowRunData, WorkflowRunResponse,
};
pub use streaming::{SseDecoder, decode_lines};
pub use usage::Usage;
pub use workflow::GlikWorkflow;

/// Re-export common types for convenience
pub use futures_util::stream::BoxStream;
