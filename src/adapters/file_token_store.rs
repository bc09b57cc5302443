//! File-based token store adapter.
//!
//! Persists the auth token in the [`LocalStorage`] JSON file under the
//! `authToken` key.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::storage::LocalStorage;
use crate::traits::{TokenStore, AUTH_TOKEN_KEY};

/// File-based token store.
///
/// Tokens are stored in `~/.musicboxd/storage.json` unless a path is given.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    storage: LocalStorage,
}

impl FileTokenStore {
    /// Store at the default location.
    ///
    /// # Returns
    /// The store, or an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self::with_path(LocalStorage::default_path()?))
    }

    /// Store at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            storage: LocalStorage::new(path),
        }
    }

    /// Get the path to the storage file.
    pub fn path(&self) -> &Path {
        self.storage.path()
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .storage
            .get(AUTH_TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    async fn save(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(AUTH_TOKEN_KEY, token)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(AUTH_TOKEN_KEY)
    }
}
