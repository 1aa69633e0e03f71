//! Session token handling.
//!
//! [`SessionStore`] is the single owner of the bearer token. Reads never
//! fail: storage problems are logged and reported as "no session".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::traits::{TokenStore, TokenStoreError};

/// Access to the persisted session token.
///
/// Cloning is cheap; every clone talks to the same underlying store and
/// shares the signed-out marker.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn TokenStore>,
    /// Set by [`clear`](Self::clear) until the next successful
    /// [`set`](Self::set). Hides a token the store failed to remove.
    signed_out: Arc<AtomicBool>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            signed_out: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Persist `token`, replacing any previous session.
    pub async fn set(&self, token: &str) -> Result<(), TokenStoreError> {
        self.store.save(token).await.map_err(|e| {
            tracing::warn!("Failed to store session token: {}", e);
            e
        })?;
        self.signed_out.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// The stored token, or `None` when absent, empty or unreadable.
    pub async fn get(&self) -> Option<String> {
        if self.signed_out.load(Ordering::SeqCst) {
            return None;
        }
        match self.store.load().await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read session token: {}", e);
                None
            }
        }
    }

    /// Remove the stored token.
    ///
    /// If deletion fails the token is overwritten with an empty value. This
    /// session reports no token afterwards even if both writes fail.
    pub async fn clear(&self) {
        self.signed_out.store(true, Ordering::SeqCst);
        if let Err(e) = self.store.clear().await {
            tracing::warn!("Failed to delete session token: {}", e);
            if let Err(e) = self.store.save("").await {
                tracing::error!("Failed to blank session token: {}", e);
            }
        }
    }
}
