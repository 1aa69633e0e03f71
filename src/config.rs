//! Runtime configuration.
//!
//! Built from the environment with [`AppConfig::from_env`], then adjusted
//! with the builder methods (the CLI applies `--api-url` this way).
//!
//! # Example
//!
//! ```ignore
//! use medicare::config::AppConfig;
//!
//! let config = AppConfig::from_env().with_api_url("http://localhost:4000/");
//! assert_eq!(config.api_url, "http://localhost:4000");
//! ```

use std::path::PathBuf;

use crate::adapters::file_token_store::DATA_DIR;
use crate::auth::OAuthConfig;

/// Backend used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Log filter used when `MEDICARE_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

const LOG_FILE: &str = "medicare.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL, without a trailing slash
    pub api_url: String,
    /// Google OAuth client id; Google sign-in is disabled without it
    pub google_client_id: Option<String>,
    /// Google OAuth client secret, for clients registered as web apps
    pub google_client_secret: Option<String>,
    /// Override for the session token file
    pub session_file: Option<PathBuf>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            google_client_id: None,
            google_client_secret: None,
            session_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `MEDICARE_*` variables, falling back to the `EXPO_PUBLIC_*`
    /// names used by the mobile build.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = env_var("MEDICARE_API_URL").or_else(|| env_var("EXPO_PUBLIC_API_URL")) {
            config = config.with_api_url(url);
        }
        config.google_client_id = env_var("MEDICARE_GOOGLE_CLIENT_ID")
            .or_else(|| env_var("EXPO_PUBLIC_GOOGLE_CLIENT_ID"));
        config.google_client_secret = env_var("MEDICARE_GOOGLE_CLIENT_SECRET");
        config.session_file = env_var("MEDICARE_SESSION_FILE").map(PathBuf::from);
        if let Some(filter) = env_var("MEDICARE_LOG") {
            config.log_filter = filter;
        }

        config
    }

    /// Set the backend URL. Trailing slashes are dropped.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_google_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.google_client_id = Some(client_id.into());
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Google OAuth settings, when a client id is configured.
    pub fn oauth(&self) -> Option<OAuthConfig> {
        let client_id = self.google_client_id.as_deref()?;
        let config = OAuthConfig::google(client_id);
        Some(match &self.google_client_secret {
            Some(secret) => config.with_client_secret(secret.clone()),
            None => config,
        })
    }

    /// Where log output is written: `~/.medicare/medicare.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DATA_DIR).join(LOG_FILE))
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
