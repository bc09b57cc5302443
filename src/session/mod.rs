//! Session store.
//!
//! Holds the bearer token and the signed-in user's profile snapshot, and is
//! the only writer of the persisted token. The [`Session`] itself sits behind
//! a [`SharedSession`] so the API gateway can read the token without owning
//! the store.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::MusicboxdApi;
use crate::error::{ApiError, StorageError};
use crate::models::User;
use crate::traits::TokenStore;
use crate::view::{ActiveView, ViewRouter};

/// Session state shared between the store and the gateway.
pub type SharedSession = Arc<RwLock<Session>>;

/// Client-side record of the authenticated user.
///
/// `user` is only ever present while `token` is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Install a token. A different token drops the cached user.
    pub fn set_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        if self.token.as_deref() != Some(token.as_str()) {
            self.user = None;
        }
        self.token = Some(token);
    }

    /// Cache the profile snapshot. Refused (returns false) without a token.
    pub fn set_user(&mut self, user: User) -> bool {
        if self.token.is_none() {
            return false;
        }
        self.user = Some(user);
        true
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// What [`SessionStore::restore`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A persisted token was validated by a profile fetch.
    Authenticated,
    /// The server accepted the token but its profile body could not be
    /// decoded. The token is kept; no user snapshot is cached.
    ProfileUnavailable,
    /// A persisted token was found, the profile fetch failed, and the token
    /// was cleared.
    Rejected,
    /// Nothing was persisted.
    Unauthenticated,
}

impl RestoreOutcome {
    pub fn is_authenticated(self) -> bool {
        matches!(
            self,
            RestoreOutcome::Authenticated | RestoreOutcome::ProfileUnavailable
        )
    }

    /// The view to start in.
    pub fn initial_view(self) -> ActiveView {
        if self.is_authenticated() {
            ActiveView::Search
        } else {
            ActiveView::Auth
        }
    }
}

/// Owner of the session and of the persisted token.
#[derive(Clone)]
pub struct SessionStore {
    session: SharedSession,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::default())),
            tokens,
        }
    }

    /// Handle for components that only read the session.
    pub fn shared(&self) -> SharedSession {
        Arc::clone(&self.session)
    }

    /// Snapshot of the current session.
    pub async fn current(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Load the persisted token and validate it with a profile fetch.
    ///
    /// A non-2xx response or network failure clears the token from memory
    /// and disk. An undecodable 2xx body keeps it.
    pub async fn restore(&self, api: &MusicboxdApi) -> RestoreOutcome {
        let token = match self.tokens.load().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("No persisted token");
                return RestoreOutcome::Unauthenticated;
            }
            Err(e) => {
                tracing::warn!("Could not read persisted token: {}", e);
                return RestoreOutcome::Unauthenticated;
            }
        };

        self.session.write().await.set_token(token);
        match self.validate(api).await {
            Ok(_) => RestoreOutcome::Authenticated,
            Err(ApiError::InvalidResponse { .. }) => RestoreOutcome::ProfileUnavailable,
            Err(_) => RestoreOutcome::Rejected,
        }
    }

    /// Fetch the own profile to confirm the token is still accepted.
    ///
    /// On success the snapshot is cached. A 2xx whose body doesn't decode
    /// leaves the token in place without a user. Any other failure clears
    /// the session and the persisted token.
    pub async fn validate(&self, api: &MusicboxdApi) -> Result<User, ApiError> {
        match api.own_profile().await {
            Ok(user) => {
                if self.session.write().await.set_user(user.clone()) {
                    tracing::info!(username = %user.username, "Session validated");
                }
                Ok(user)
            }
            Err(err @ ApiError::InvalidResponse { .. }) => {
                tracing::warn!(code = err.error_code(), "Profile body unreadable, keeping token: {}", err);
                Err(err)
            }
            Err(err) => {
                tracing::info!(code = err.error_code(), "Profile validation failed, clearing session");
                self.clear().await;
                Err(err)
            }
        }
    }

    /// Persist `token` and make it current. Used between the login call and
    /// the profile fetch that follows it.
    pub async fn store_token(&self, token: &str) -> Result<(), StorageError> {
        self.session.write().await.set_token(token);
        self.tokens.save(token).await
    }

    /// Install a token and profile together and persist the token.
    pub async fn login(&self, token: &str, user: User) -> Result<(), StorageError> {
        {
            let mut session = self.session.write().await;
            session.set_token(token);
            session.set_user(user);
        }
        tracing::info!("Logged in");
        self.tokens.save(token).await
    }

    /// Replace the cached profile snapshot. Ignored when signed out.
    pub async fn update_user(&self, user: User) -> bool {
        self.session.write().await.set_user(user)
    }

    /// Clear the session, remove the persisted token and return to `Auth`.
    pub async fn logout(&self, router: &mut ViewRouter) {
        self.clear().await;
        router.reset_to_auth();
        tracing::info!("Logged out");
    }

    async fn clear(&self) {
        self.session.write().await.clear();
        if let Err(e) = self.tokens.clear().await {
            tracing::warn!("Could not remove persisted token: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryTokenStore, MockHttpClient, MockResponse};
    use crate::api::ApiGateway;
    use crate::config::ClientConfig;
    use serde_json::json;

    fn user(name: &str) -> User {
        serde_json::from_value(json!({"id": 1, "username": name})).unwrap()
    }

    fn setup(tokens: &InMemoryTokenStore) -> (SessionStore, MockHttpClient, MusicboxdApi) {
        let store = SessionStore::new(Arc::new(tokens.clone()));
        let mock = MockHttpClient::new();
        let config = ClientConfig::new().with_api_base_url("http://api.test");
        let api = MusicboxdApi::new(ApiGateway::new(
            Arc::new(mock.clone()),
            store.shared(),
            &config,
        ));
        (store, mock, api)
    }

    #[test]
    fn test_user_requires_token() {
        let mut session = Session::default();
        assert!(!session.set_user(user("ana")));
        assert!(session.user().is_none());

        session.set_token("t");
        assert!(session.set_user(user("ana")));
        session.set_token("other");
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_login_persists_and_logout_clears() {
        let tokens = InMemoryTokenStore::new();
        let (store, _, _) = setup(&tokens);
        let mut router = ViewRouter::new(ActiveView::Search);

        store.login("abc", user("ana")).await.unwrap();
        assert_eq!(tokens.token(), Some("abc".to_string()));
        assert_eq!(store.current().await.user().unwrap().username, "ana");

        store.logout(&mut router).await;
        assert_eq!(tokens.token(), None);
        assert_eq!(store.current().await, Session::default());
        assert_eq!(router.active(), ActiveView::Auth);
    }

    #[tokio::test]
    async fn test_restore_without_token() {
        let tokens = InMemoryTokenStore::new();
        let (store, mock, api) = setup(&tokens);

        let outcome = store.restore(&api).await;
        assert_eq!(outcome, RestoreOutcome::Unauthenticated);
        assert_eq!(outcome.initial_view(), ActiveView::Auth);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let tokens = InMemoryTokenStore::with_token("abc");
        let (store, mock, api) = setup(&tokens);
        mock.set_response(
            "http://api.test/user/profile",
            MockResponse::json(200, json!({"id": 1, "username": "ana"})),
        );

        assert_eq!(store.restore(&api).await, RestoreOutcome::Authenticated);
        assert_eq!(
            mock.get_requests()[0].header("Authorization"),
            Some("Bearer abc")
        );
        assert_eq!(store.current().await.user().unwrap().username, "ana");
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_clears_it() {
        let tokens = InMemoryTokenStore::with_token("stale");
        let (store, mock, api) = setup(&tokens);
        mock.set_response(
            "http://api.test/user/profile",
            MockResponse::json(401, json!({"detail": "Could not validate credentials"})),
        );

        assert_eq!(store.restore(&api).await, RestoreOutcome::Rejected);
        assert_eq!(tokens.token(), None);
        assert!(!store.is_authenticated().await);

        mock.clear_requests();
        assert_eq!(store.restore(&api).await, RestoreOutcome::Unauthenticated);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_network_failure_clears_token() {
        let tokens = InMemoryTokenStore::with_token("abc");
        let (store, mock, api) = setup(&tokens);
        mock.set_default_response(MockResponse::connection_refused());

        assert_eq!(store.restore(&api).await, RestoreOutcome::Rejected);
        assert_eq!(tokens.token(), None);
    }

    #[tokio::test]
    async fn test_undecodable_profile_keeps_token() {
        let tokens = InMemoryTokenStore::with_token("abc");
        let (store, mock, api) = setup(&tokens);
        mock.set_response(
            "http://api.test/user/profile",
            MockResponse::text(200, "<html>maintenance</html>"),
        );

        let outcome = store.restore(&api).await;
        assert_eq!(outcome, RestoreOutcome::ProfileUnavailable);
        assert_eq!(outcome.initial_view(), ActiveView::Search);
        assert_eq!(tokens.token(), Some("abc".to_string()));

        let session = store.current().await;
        assert_eq!(session.token(), Some("abc"));
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_storage_is_unauthenticated() {
        let tokens = InMemoryTokenStore::with_token("abc");
        tokens.set_load_should_fail(true);
        let (store, _, api) = setup(&tokens);

        assert_eq!(store.restore(&api).await, RestoreOutcome::Unauthenticated);
    }
}
