//! Google sign-in for a terminal client.
//!
//! Uses the authorization-code flow with PKCE and a loopback redirect:
//! the consent page is opened in the browser, a small server on
//! `127.0.0.1` waits for the redirect, and the code is exchanged for an
//! access token. The Google profile is then traded with the backend for a
//! MediCare session token.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};

use super::session::SessionStore;
use crate::api::{ApiClient, ApiError};
use crate::models::OAuthExchangeRequest;
use crate::traits::{Headers, HttpClient, HttpError, TokenStoreError};

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

const SCOPES: &str = "profile email";

/// How long to wait for the browser to come back.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(300);

const CALLBACK_PAGE: &str = "<html><body style=\"font-family:sans-serif\">\
<h2>Signed in to MediCare</h2><p>You can close this tab and return to the terminal.</p>\
</body></html>";

const CALLBACK_FAILED_PAGE: &str = "<html><body style=\"font-family:sans-serif\">\
<h2>MediCare sign-in did not complete</h2><p>Return to the terminal for details.</p>\
</body></html>";

/// OAuth client settings.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl OAuthConfig {
    /// Google endpoints for the given client id.
    pub fn google(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
        }
    }

    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    pub fn with_endpoints(
        mut self,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
        userinfo_url: impl Into<String>,
    ) -> Self {
        self.auth_url = auth_url.into();
        self.token_url = token_url.into();
        self.userinfo_url = userinfo_url.into();
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("Google sign-in is not configured")]
    NotConfigured,

    #[error("could not start local callback listener: {0}")]
    Listener(#[source] std::io::Error),

    #[error("could not open browser: {0}")]
    Browser(String),

    #[error("timed out waiting for the browser")]
    Timeout,

    #[error("sign-in was denied: {0}")]
    Denied(String),

    #[error("invalid callback: {0}")]
    InvalidCallback(String),

    #[error("provider request failed: {0}")]
    Provider(String),

    #[error("request failed: {0}")]
    Http(#[from] HttpError),

    #[error("backend exchange failed: {0}")]
    Exchange(#[source] ApiError),

    #[error("Invalid token from server")]
    MissingToken,

    #[error("could not store session: {0}")]
    Storage(#[from] TokenStoreError),
}

impl OAuthError {
    pub fn user_message(&self) -> String {
        match self {
            OAuthError::Exchange(e @ ApiError::Server { .. }) => e.user_message(),
            OAuthError::MissingToken => "Invalid token from server".to_string(),
            OAuthError::NotConfigured => {
                "Google sign-in is not configured. Set MEDICARE_GOOGLE_CLIENT_ID.".to_string()
            }
            OAuthError::Denied(_) => "Google sign-in was cancelled.".to_string(),
            OAuthError::Timeout => "Google sign-in timed out. Please try again.".to_string(),
            _ => "Something went wrong".to_string(),
        }
    }
}

/// PKCE verifier and its S256 challenge.
#[derive(Debug, Clone)]
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    pub fn generate() -> Self {
        let verifier = format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        );
        let challenge = challenge_for(&verifier);
        Self {
            verifier,
            challenge,
        }
    }
}

/// S256 code challenge for `verifier`.
pub fn challenge_for(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

/// The URL of the consent page.
pub fn consent_url(config: &OAuthConfig, redirect_uri: &str, pkce: &Pkce, state: &str) -> String {
    let params = [
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("response_type", "code"),
        ("scope", SCOPES),
        ("code_challenge", pkce.challenge.as_str()),
        ("code_challenge_method", "S256"),
        ("state", state),
    ];
    format!("{}?{}", config.auth_url, encode_form(&params))
}

fn encode_form(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Query parameters of the loopback redirect.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// What a request on the callback server means for the sign-in.
///
/// `None` means the request is unrelated (a favicon fetch, a stale tab
/// from an earlier attempt) and the server keeps waiting. An `error` ends
/// the flow unless it names a different state.
pub fn callback_outcome(
    params: &CallbackParams,
    expected_state: &str,
) -> Option<Result<String, OAuthError>> {
    let state_matches = params.state.as_deref() == Some(expected_state);
    if let Some(error) = &params.error {
        if state_matches || params.state.is_none() {
            return Some(Err(OAuthError::Denied(error.clone())));
        }
        return None;
    }
    if !state_matches {
        return None;
    }
    Some(
        params
            .code
            .clone()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| OAuthError::InvalidCallback("missing code".to_string())),
    )
}

#[derive(Clone)]
struct CallbackServer {
    expected_state: Arc<str>,
    outcome: Arc<Mutex<Option<oneshot::Sender<Result<String, OAuthError>>>>>,
}

async fn handle_callback(
    State(server): State<CallbackServer>,
    Query(params): Query<CallbackParams>,
) -> (StatusCode, Html<&'static str>) {
    let Some(outcome) = callback_outcome(&params, &server.expected_state) else {
        tracing::debug!("Ignoring unrelated request on the OAuth callback");
        return (StatusCode::NOT_FOUND, Html(""));
    };
    let page = if outcome.is_ok() {
        CALLBACK_PAGE
    } else {
        CALLBACK_FAILED_PAGE
    };
    if let Some(sender) = server.outcome.lock().await.take() {
        let _ = sender.send(outcome);
    }
    (StatusCode::OK, Html(page))
}

/// Serve the redirect on `listener` until a request carries
/// `expected_state` or an error, then return the authorization code.
///
/// The server is shut down on every exit path, including `wait` running
/// out and the returned future being dropped.
pub async fn receive_callback(
    listener: TcpListener,
    expected_state: &str,
    wait: Duration,
) -> Result<String, OAuthError> {
    let (outcome_tx, outcome_rx) = oneshot::channel();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let app = Router::new()
        .route("/", get(handle_callback))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .with_state(CallbackServer {
            expected_state: Arc::from(expected_state),
            outcome: Arc::new(Mutex::new(Some(outcome_tx))),
        });

    tokio::spawn(async move {
        // Resolves when `stop_tx` is sent or dropped.
        let shutdown = async {
            let _ = stop_rx.await;
        };
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            tracing::warn!("OAuth callback server failed: {}", e);
        }
    });

    let result = match tokio::time::timeout(wait, outcome_rx).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(_)) => Err(OAuthError::InvalidCallback(
            "callback server stopped".to_string(),
        )),
        Err(_) => Err(OAuthError::Timeout),
    };
    let _ = stop_tx.send(());
    result
}

#[derive(Debug, Deserialize)]
struct ProviderToken {
    access_token: String,
}

/// Profile fields returned by the userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Trade an authorization code for a provider access token.
pub async fn exchange_code(
    http: &dyn HttpClient,
    config: &OAuthConfig,
    code: &str,
    verifier: &str,
    redirect_uri: &str,
) -> Result<String, OAuthError> {
    let mut params = vec![
        ("client_id", config.client_id.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("grant_type", "authorization_code"),
        ("redirect_uri", redirect_uri),
    ];
    if let Some(secret) = &config.client_secret {
        params.push(("client_secret", secret.as_str()));
    }

    let mut headers = Headers::new();
    headers.insert(
        "Content-Type".to_string(),
        "application/x-www-form-urlencoded".to_string(),
    );

    let response = http
        .post(&config.token_url, &encode_form(&params), &headers)
        .await?;
    if !response.is_success() {
        return Err(OAuthError::Provider(format!(
            "token endpoint returned {}: {}",
            response.status,
            response.text().unwrap_or_default()
        )));
    }
    let token: ProviderToken = response
        .json()
        .map_err(|e| OAuthError::Provider(e.to_string()))?;
    Ok(token.access_token)
}

/// Fetch the signed-in Google profile.
pub async fn fetch_userinfo(
    http: &dyn HttpClient,
    config: &OAuthConfig,
    access_token: &str,
) -> Result<GoogleUserInfo, OAuthError> {
    let mut headers = Headers::new();
    headers.insert(
        "Authorization".to_string(),
        format!("Bearer {}", access_token),
    );

    let response = http.get(&config.userinfo_url, &headers).await?;
    if !response.is_success() {
        return Err(OAuthError::Provider(format!(
            "userinfo endpoint returned {}",
            response.status
        )));
    }
    response
        .json()
        .map_err(|e| OAuthError::Provider(e.to_string()))
}

/// Trade the Google profile for a MediCare session and store it.
pub async fn complete_sign_in(
    api: &ApiClient,
    session: &SessionStore,
    info: GoogleUserInfo,
) -> Result<(), OAuthError> {
    let response = api
        .oauth_exchange(&OAuthExchangeRequest {
            email: info.email,
            name: info.name,
            image: info.picture,
        })
        .await
        .map_err(OAuthError::Exchange)?;

    let token = response
        .token
        .filter(|t| !t.is_empty())
        .ok_or(OAuthError::MissingToken)?;
    session.set(&token).await?;
    Ok(())
}

/// Run the whole browser sign-in.
///
/// `open_browser` receives the consent URL; production passes a wrapper
/// around `webbrowser::open`.
pub async fn sign_in_with_google<F>(
    api: &ApiClient,
    session: &SessionStore,
    http: Arc<dyn HttpClient>,
    config: &OAuthConfig,
    open_browser: F,
) -> Result<(), OAuthError>
where
    F: FnOnce(&str) -> Result<(), String>,
{
    if config.client_id.is_empty() {
        return Err(OAuthError::NotConfigured);
    }

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(OAuthError::Listener)?;
    let port = listener.local_addr().map_err(OAuthError::Listener)?.port();
    let redirect_uri = format!("http://127.0.0.1:{}", port);

    let pkce = Pkce::generate();
    let state = uuid::Uuid::new_v4().simple().to_string();
    let url = consent_url(config, &redirect_uri, &pkce, &state);

    tracing::info!("Opening Google consent page, callback on port {}", port);
    open_browser(&url).map_err(OAuthError::Browser)?;

    let code = receive_callback(listener, &state, CALLBACK_TIMEOUT).await?;

    let access_token =
        exchange_code(http.as_ref(), config, &code, &pkce.verifier, &redirect_uri).await?;
    let info = fetch_userinfo(http.as_ref(), config, &access_token).await?;
    complete_sign_in(api, session, info).await
}

/// Open `url` in the system browser.
pub fn open_in_browser(url: &str) -> Result<(), String> {
    webbrowser::open(url).map_err(|e| e.to_string())
}
