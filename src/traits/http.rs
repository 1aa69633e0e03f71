//! HTTP transport seam.
//!
//! Every backend and OAuth call goes through [`HttpClient`], so the API
//! layer, the booking sequence and the sign-in flows can run against the
//! recording mock in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// Request or response headers by name.
pub type Headers = HashMap<String, String>;

/// A response of any status. Status interpretation is left to the caller.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: Bytes) -> Self {
        Self::with_headers(status, Headers::new(), body)
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response carrying `value` as its JSON body.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let headers = Headers::from([("content-type".to_string(), "application/json".to_string())]);
        Self::with_headers(status, headers, Bytes::from(value.to_string()))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The request produced no response at all.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request timeout: {0}")]
    Timeout(String),
    #[error("Request cancelled")]
    Cancelled,
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error: {0}")]
    Other(String),
}

/// GET/POST/PUT with pre-encoded bodies; the caller sets `Content-Type`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;
}
