//! Common test utilities for integration tests.
//!
//! Tests run the real reqwest transport against a `wiremock` server, so
//! request paths, headers and bodies are checked the way the backend sees
//! them.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! let app = TestApp::new(&server).signed_in_as("42", "Ann").build();
//! ```

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ratatui::{backend::TestBackend, Terminal};
use serde_json::{json, Value};
use wiremock::MockServer;

use medicare::adapters::{InMemoryTokenStore, ReqwestHttpClient};
use medicare::api::ApiClient;
use medicare::app::App;
use medicare::auth::SessionStore;
use medicare::config::AppConfig;
use medicare::services::Services;

/// A JWT whose payload is `claims`. The signature is never checked.
pub fn token_for(claims: Value) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

/// Token for patient "42", named Ann.
pub fn patient_token() -> String {
    token_for(json!({"sub": "42", "name": "Ann", "email": "ann@example.com"}))
}

/// Services pointed at `server`, sharing `store`.
pub fn services_for(server: &MockServer, store: &InMemoryTokenStore) -> Services {
    Services::new(
        AppConfig::new().with_api_url(server.uri()),
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(store.clone()),
    )
}

/// An API client and session for `server`.
pub fn api_for(server: &MockServer, store: &InMemoryTokenStore) -> (ApiClient, SessionStore) {
    let services = services_for(server, store);
    (services.api, services.session)
}

/// Builder for an [`App`] talking to a mock server.
pub struct TestApp<'a> {
    server: &'a MockServer,
    store: InMemoryTokenStore,
}

impl<'a> TestApp<'a> {
    pub fn new(server: &'a MockServer) -> Self {
        Self {
            server,
            store: InMemoryTokenStore::new(),
        }
    }

    pub fn with_token(self, token: &str) -> Self {
        self.store.set_token(Some(token.to_string()));
        self
    }

    pub fn signed_in(self) -> Self {
        self.with_token(&patient_token())
    }

    pub fn store(&self) -> InMemoryTokenStore {
        self.store.clone()
    }

    pub fn build(self) -> App {
        App::new(services_for(self.server, &self.store))
    }
}

/// Deliver async results to `app` until none arrive for a while.
pub async fn settle(app: &mut App) {
    let Some(mut rx) = app.message_rx.take() else {
        return;
    };
    while let Ok(Some(msg)) = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await {
        app.handle_message(msg);
    }
    app.message_rx = Some(rx);
}

/// Render `app` into an in-memory terminal and return the screen text.
pub fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| medicare::ui::render(f, app))
        .unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

pub fn slot_booking_json(slot_id: &str, doctor_id: &str) -> Value {
    json!({
        "id": slot_id,
        "date": "2025-03-04",
        "startTime": "09:00",
        "endTime": "09:30",
        "doctorId": doctor_id,
        "doctorName": "Dr. Rao",
        "doctorSpecialty": "Cardiology",
        "doctorQualifications": "MBBS, MD"
    })
}
