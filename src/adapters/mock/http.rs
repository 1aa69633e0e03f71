//! Recording HTTP client for tests.
//!
//! Responses are registered per URL (or URL prefix, or for one method
//! only) and every request is kept so tests can assert on ordering,
//! headers and bodies.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A request seen by [`MockHttpClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// "GET", "POST" or "PUT"
    pub method: String,
    pub url: String,
    pub headers: Headers,
    /// Body of POST and PUT requests
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_str(self.body.as_deref()?).ok()
    }
}

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// A response with any status
    Success(Response),
    /// A transport failure
    Error(HttpError),
}

impl MockResponse {
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }
}

#[derive(Debug, Default)]
struct MockState {
    /// Answered once each, in order, before anything else for the URL
    queued: HashMap<String, VecDeque<MockResponse>>,
    by_method: HashMap<(String, String), MockResponse>,
    by_url: HashMap<String, MockResponse>,
    fallback: Option<MockResponse>,
    requests: Vec<RecordedRequest>,
}

impl MockState {
    /// Queued, then method and URL, then URL, then the longest registered
    /// prefix, then the fallback.
    fn lookup(&mut self, method: &str, url: &str) -> Option<MockResponse> {
        if let Some(next) = self.queued.get_mut(url).and_then(VecDeque::pop_front) {
            return Some(next);
        }
        if let Some(r) = self.by_method.get(&(method.to_string(), url.to_string())) {
            return Some(r.clone());
        }
        if let Some(r) = self.by_url.get(url) {
            return Some(r.clone());
        }
        self.by_url
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, r)| r.clone())
            .or_else(|| self.fallback.clone())
    }
}

/// [`HttpClient`] double. Clones share responses and recorded requests.
///
/// ```ignore
/// let http = MockHttpClient::new();
/// http.set_response(
///     "http://api.test/api/doctors",
///     MockResponse::json(200, serde_json::json!([])),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request to `url`, or to URLs it prefixes.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.state
            .lock()
            .unwrap()
            .by_url
            .insert(url.to_string(), response);
    }

    /// Answer only `method` requests to exactly `url`.
    pub fn set_method_response(&self, method: &str, url: &str, response: MockResponse) {
        self.state
            .lock()
            .unwrap()
            .by_method
            .insert((method.to_string(), url.to_string()), response);
    }

    /// Answer the next request to exactly `url` once. Queued responses are
    /// used in the order they were pushed.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        self.state
            .lock()
            .unwrap()
            .queued
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    /// Answer anything nothing else matches.
    pub fn set_default_response(&self, response: MockResponse) {
        self.state.lock().unwrap().fallback = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.get_requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }

    fn handle(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> Result<Response, HttpError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
        });
        match state.lookup(method, url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for {} {}", method, url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle("GET", url, headers, None)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle("POST", url, headers, Some(body))
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.handle("PUT", url, headers, Some(body))
    }
}
