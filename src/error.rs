use thiserror::Error;

/// Errors surfaced by Glik API requests.
#[derive(Error, Debug)]
pub enum GlikRequestError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success status reported by the service, produced only by the
    /// explicit [`crate::response::ApiResponse::error_for_status`] opt-in
    /// or the streaming wrappers.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// Invalid event data in a streaming response
    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    /// UTF-8 conversion error
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A dataset operation was attempted without a dataset id set on the
    /// client.
    #[error("dataset_id is not set")]
    DatasetIdMissing,
}

/// Parse an error response from HTTP status and body.
pub(crate) fn parse_error_response(
    status: reqwest::StatusCode,
    body: bytes::Bytes,
) -> GlikRequestError {
    let message = serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| extract_error_message(&json))
        .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());

    GlikRequestError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Extract the human-readable message from the service error body.
fn extract_error_message(json: &serde_json::Value) -> Option<String> {
    // Glik format: {"code": "...", "message": "...", "status": 400}
    if let Some(message) = json.get("message").and_then(serde_json::Value::as_str) {
        return Some(message.to_string());
    }

    // Nested format: {"error": {"message": "..."}}
    if let Some(message) = json
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(serde_json::Value::as_str)
    {
        return Some(message.to_string());
    }

    None
}
