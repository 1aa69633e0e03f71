//! Network-related error types.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { url: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// The URL could not be built or parsed.
    InvalidUrl { url: String },

    /// Invalid response format.
    InvalidResponse { message: String },

    /// Request was cancelled.
    Cancelled,

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Classify a transport error for the request to `url`.
    pub fn from_http(err: &HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message: message.clone(),
            },
            HttpError::Timeout(_) => NetworkError::Timeout {
                url: url.to_string(),
            },
            HttpError::Cancelled => NetworkError::Cancelled,
            HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
                url: url.to_string(),
            },
            HttpError::Other(message) => NetworkError::Other {
                message: message.clone(),
            },
        }
    }

    /// Check if a manual retry is likely to help.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            NetworkError::Timeout { .. } => {
                "The server took too long to respond. Please try again.".to_string()
            }
            NetworkError::HttpStatus { status, .. } => status_message(*status),
            NetworkError::InvalidUrl { url } => {
                format!("The server address '{}' is not valid.", url)
            }
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }
}

/// User-facing text for an HTTP status code.
pub fn status_message(status: u16) -> String {
    match status {
        400 => "The request was invalid. Please try again.".to_string(),
        401 => "Authentication required. Please sign in again.".to_string(),
        403 => "Access denied. You don't have permission for this action.".to_string(),
        404 => "The requested resource was not found.".to_string(),
        409 => "That change conflicts with the current state. Please refresh.".to_string(),
        429 => "Too many requests. Please wait a moment and try again.".to_string(),
        500..=599 => "The server is experiencing issues. Please try again later.".to_string(),
        _ => format!(
            "The server returned an error (HTTP {}). Please try again.",
            status
        ),
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { url } => write!(f, "Request to '{}' timed out", url),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}
