//! Errors from backend calls.

use crate::error::{status_message, ErrorCategory, NetworkError};
use crate::traits::HttpError;

/// Error returned by [`ApiClient`](super::ApiClient) calls.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response
    Http { url: String, source: HttpError },
    /// Server returned a non-2xx status; `message` is the response body
    Server { status: u16, message: String },
    /// JSON serialization or deserialization failed
    Json(serde_json::Error),
}

impl ApiError {
    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Http { .. } => ErrorCategory::Network,
            ApiError::Server { status: 401, .. } | ApiError::Server { status: 403, .. } => {
                ErrorCategory::Auth
            }
            ApiError::Server { .. } => ErrorCategory::Server,
            ApiError::Json(_) => ErrorCategory::Decode,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.to_network_error()
            .map(|e| e.is_retryable())
            .unwrap_or(false)
    }

    /// Classify as a [`NetworkError`], when the failure was on the wire.
    pub fn to_network_error(&self) -> Option<NetworkError> {
        match self {
            ApiError::Http { url, source } => Some(NetworkError::from_http(source, url)),
            ApiError::Server { status, message } => Some(NetworkError::HttpStatus {
                status: *status,
                message: message.clone(),
            }),
            ApiError::Json(_) => None,
        }
    }

    /// Text to show the user.
    ///
    /// Server errors show what the backend said, when it said anything.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { status, message } => {
                server_message(message).unwrap_or_else(|| status_message(*status))
            }
            ApiError::Http { url, source } => NetworkError::from_http(source, url).user_message(),
            ApiError::Json(_) => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
        }
    }
}

/// Pull a readable message out of an error body.
///
/// Accepts `{"message": ...}`, `{"error": ...}`, a bare JSON string, or
/// plain text.
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(s)) => Some(s),
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http { url, source } => write!(f, "Request to {} failed: {}", url, source),
            ApiError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            ApiError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http { source, .. } => Some(source),
            ApiError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e)
    }
}
