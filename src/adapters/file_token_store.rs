//! File-based token store adapter.
//!
//! The session token is kept in `~/.medicare/session.json` as
//! `{"token": "..."}`. On Unix the file is restricted to the owner.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::traits::{TokenStore, TokenStoreError};

/// The data directory name.
pub const DATA_DIR: &str = ".medicare";

/// The session file name.
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    token: Option<String>,
}

/// File-based token store.
///
/// # Example
///
/// ```ignore
/// use medicare::adapters::FileTokenStore;
/// use medicare::traits::TokenStore;
///
/// let store = FileTokenStore::new()?;
/// store.save("eyJhbGciOi...").await?;
/// assert!(store.load().await?.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    token_path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at the default location under the home directory.
    pub fn new() -> Result<Self, TokenStoreError> {
        let home = dirs::home_dir().ok_or_else(|| {
            TokenStoreError::Io("Failed to determine home directory".to_string())
        })?;
        Ok(Self {
            token_path: home.join(DATA_DIR).join(SESSION_FILE),
        })
    }

    /// Create a store backed by an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            token_path: path.into(),
        }
    }

    /// Get the path to the session file.
    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    fn write_file(&self, contents: &SessionFile) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.token_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| TokenStoreError::Io(e.to_string()))?;
            }
        }

        let file = File::create(&self.token_path)
            .map_err(|e| TokenStoreError::SaveFailed(e.to_string()))?;
        restrict_permissions(&self.token_path);

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, contents)
            .map_err(|e| TokenStoreError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| TokenStoreError::SaveFailed(e.to_string()))
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::warn!("Could not restrict permissions on {}: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        if !self.token_path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.token_path)
            .map_err(|e| TokenStoreError::LoadFailed(e.to_string()))?;
        let contents: SessionFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| TokenStoreError::Serialization(e.to_string()))?;

        Ok(contents.token.filter(|t| !t.is_empty()))
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        self.write_file(&SessionFile {
            token: Some(token.to_string()),
        })
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        if !self.token_path.exists() {
            return Ok(());
        }

        match fs::remove_file(&self.token_path) {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!("Could not delete session file, blanking it instead: {}", e);
                self.write_file(&SessionFile::default())
                    .map_err(|_| TokenStoreError::ClearFailed(e.to_string()))
            }
        }
    }
}
