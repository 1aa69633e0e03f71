//! Token store trait abstraction.
//!
//! The session token is the only value the client persists. [`TokenStore`]
//! hides where it lives so the session layer can be tested in memory.

use async_trait::async_trait;

/// Token storage errors.
#[derive(Debug, Clone)]
pub enum TokenStoreError {
    /// Failed to read the stored token
    LoadFailed(String),
    /// Failed to write the token
    SaveFailed(String),
    /// Failed to delete the token
    ClearFailed(String),
    /// IO error
    Io(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl std::fmt::Display for TokenStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenStoreError::LoadFailed(msg) => write!(f, "Failed to load token: {}", msg),
            TokenStoreError::SaveFailed(msg) => write!(f, "Failed to save token: {}", msg),
            TokenStoreError::ClearFailed(msg) => write!(f, "Failed to clear token: {}", msg),
            TokenStoreError::Io(msg) => write!(f, "IO error: {}", msg),
            TokenStoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for TokenStoreError {}

/// Trait for bearer token storage.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the stored token.
    ///
    /// # Returns
    /// - `Ok(Some(token))` if a token is stored
    /// - `Ok(None)` if nothing is stored
    /// - `Err(error)` if reading failed
    async fn load(&self) -> Result<Option<String>, TokenStoreError>;

    /// Store a token, replacing any previous value.
    async fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Delete the stored token.
    async fn clear(&self) -> Result<(), TokenStoreError>;
}
