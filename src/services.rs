//! The collaborators every front end needs, built once from configuration.

use std::sync::Arc;

use crate::adapters::{FileTokenStore, ReqwestHttpClient};
use crate::api::ApiClient;
use crate::auth::SessionStore;
use crate::config::AppConfig;
use crate::traits::{HttpClient, TokenStore, TokenStoreError};

/// Session, backend client and transport, sharing one token store.
#[derive(Clone)]
pub struct Services {
    pub config: AppConfig,
    pub session: SessionStore,
    pub api: ApiClient,
    /// Raw transport, for requests that do not go to the MediCare backend
    pub http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("config", &self.config)
            .field("api", &self.api)
            .finish()
    }
}

impl Services {
    /// Wire the given transport and token store together.
    pub fn new(config: AppConfig, http: Arc<dyn HttpClient>, store: Arc<dyn TokenStore>) -> Self {
        let session = SessionStore::new(store);
        let api = ApiClient::new(config.api_url.clone(), Arc::clone(&http)).with_session(session.clone());
        Self {
            config,
            session,
            api,
            http,
        }
    }

    /// Production wiring: reqwest transport and the session file.
    pub fn from_config(config: AppConfig) -> Result<Self, TokenStoreError> {
        let store = match &config.session_file {
            Some(path) => FileTokenStore::with_path(path.clone()),
            None => FileTokenStore::new()?,
        };
        Ok(Self::new(
            config,
            Arc::new(ReqwestHttpClient::new()),
            Arc::new(store),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryTokenStore, MockHttpClient, MockResponse};
    use serde_json::json;

    #[tokio::test]
    async fn test_api_shares_the_session() {
        let http = Arc::new(MockHttpClient::new());
        http.set_response(
            "http://api.test/api/doctors",
            MockResponse::json(200, json!([])),
        );
        let store = InMemoryTokenStore::new();
        let services = Services::new(
            AppConfig::new().with_api_url("http://api.test"),
            http.clone(),
            Arc::new(store.clone()),
        );

        services.session.set("tok").await.unwrap();
        services.api.list_doctors().await.unwrap();

        let requests = http.get_requests();
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer tok")
        );
        assert_eq!(store.token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_from_config_uses_session_file_override() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let services =
            Services::from_config(AppConfig::new().with_session_file(&path)).unwrap();
        assert_eq!(services.api.base_url(), crate::config::DEFAULT_API_URL);
    }
}
