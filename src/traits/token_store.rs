//! Token store trait abstraction.
//!
//! Provides a trait-based abstraction for the durable storage that keeps the
//! auth token across process restarts, enabling dependency injection and
//! mocking in tests.

use async_trait::async_trait;

use crate::error::StorageError;

/// Key under which the auth token is persisted.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Trait for persisting the opaque auth token.
///
/// Implementations include [`FileTokenStore`](crate::adapters::FileTokenStore)
/// and [`InMemoryTokenStore`](crate::adapters::InMemoryTokenStore). Only the
/// session store writes through this trait.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the persisted token.
    ///
    /// # Returns
    /// - `Ok(Some(token))` if a token is stored
    /// - `Ok(None)` if no token is stored
    /// - `Err(error)` if the storage could not be read
    async fn load(&self) -> Result<Option<String>, StorageError>;

    /// Persist `token`, replacing any previous value.
    async fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the persisted token. Succeeds when nothing is stored.
    async fn clear(&self) -> Result<(), StorageError>;
}
