//! Production [`HttpClient`] backed by reqwest.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Method;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("medicare/", env!("CARGO_PKG_VERSION"));

/// Sends backend and OAuth requests over a shared connection pool.
///
/// Timeouts are left at the transport defaults.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self { client }
    }

    fn classify(err: reqwest::Error) -> HttpError {
        let detail = err.to_string();
        if err.is_timeout() {
            HttpError::Timeout(detail)
        } else if err.is_connect() {
            HttpError::ConnectionFailed(detail)
        } else if err.is_builder() {
            HttpError::InvalidUrl(detail)
        } else {
            HttpError::Other(detail)
        }
    }

    fn response_headers(map: &reqwest::header::HeaderMap) -> Headers {
        map.iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect()
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let started = Instant::now();
        let mut builder = self.client.request(method.clone(), url);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body.to_owned());
        }

        let result = builder.send().await;
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%method, url, error = %e, "request failed");
                return Err(Self::classify(e));
            }
        };

        let status = response.status().as_u16();
        let response_headers = Self::response_headers(response.headers());
        let bytes = response.bytes().await.map_err(Self::classify)?;
        tracing::debug!(
            %method,
            url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request finished"
        );

        Ok(Response::with_headers(status, response_headers, bytes))
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.execute(Method::GET, url, None, headers).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.execute(Method::POST, url, Some(body), headers).await
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.execute(Method::PUT, url, Some(body), headers).await
    }
}
