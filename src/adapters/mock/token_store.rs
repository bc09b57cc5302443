//! In-memory token store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::traits::TokenStore;

/// In-memory token store for testing.
///
/// Clones share state, so a test can keep a handle to inspect what the
/// session store persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
    save_should_fail: Arc<Mutex<bool>>,
    load_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
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

    /// Get the stored token synchronously (for assertions).
    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    /// Set the stored token synchronously (for test setup).
    pub fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(StorageError::Other("Mock load failure".to_string()));
        }
        Ok(self.token())
    }

    async fn save(&self, token: &str) -> Result<(), StorageError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(StorageError::Other("Mock save failure".to_string()));
        }
        self.set_token(Some(token.to_string()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.set_token(None);
        Ok(())
    }
}
