//! In-memory token store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{TokenStore, TokenStoreError};

/// In-memory token store with failure injection.
///
/// # Example
///
/// ```ignore
/// use medicare::adapters::mock::InMemoryTokenStore;
/// use medicare::traits::TokenStore;
///
/// let store = InMemoryTokenStore::new();
/// assert!(store.load().await?.is_none());
///
/// store.save("test-token").await?;
/// assert_eq!(store.load().await?, Some("test-token".to_string()));
///
/// store.set_clear_should_fail(true);
/// assert!(store.clear().await.is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
    save_should_fail: Arc<Mutex<bool>>,
    load_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an initial token.
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set_token(Some(token.to_string()));
        store
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }

    /// Get the current token synchronously (for testing).
    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    /// Set the token synchronously (for testing).
    pub fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(TokenStoreError::LoadFailed("Mock load failure".to_string()));
        }

        Ok(self.token.lock().unwrap().clone())
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(TokenStoreError::SaveFailed("Mock save failure".to_string()));
        }

        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(TokenStoreError::ClearFailed("Mock clear failure".to_string()));
        }

        *self.token.lock().unwrap() = None;
        Ok(())
    }
}
