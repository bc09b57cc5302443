//! Application state and gesture handlers.
//!
//! [`App`] owns everything that changes while the client runs: the session
//! store, the view router, the per-screen UI state and the notification
//! queue. Handlers are `impl App` blocks spread across this module's files:
//! - `handlers` - auth, navigation and search
//! - `album` - the album panel (ratings, reviews, favorites)
//! - `profile` - profile tabs, social lists, follow and profile edits

mod actions;
mod album;
mod dispatch;
mod handlers;
mod profile;

pub use actions::{Action, ActionKind};
pub use dispatch::{DispatchTable, Handler};

use color_eyre::Result;
use std::sync::Arc;

use crate::adapters::{FileTokenStore, ReqwestHttpClient};
use crate::api::{ApiGateway, MusicboxdApi};
use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError, ClientResult};
use crate::models::{Album, Rating};
use crate::notifications::Notifier;
use crate::session::{RestoreOutcome, Session, SessionStore};
use crate::traits::{HttpClient, TokenStore};
use crate::view::{ActiveView, ViewRouter, PROFILE_LOAD_FAILED};

/// Shown for any transport failure of a user action.
pub const NETWORK_ERROR_NOTICE: &str = "Network error. Please try again.";

/// Which auth form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthFormMode {
    #[default]
    Login,
    Register,
}

/// Profile edit form, prefilled from the session user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileEditForm {
    pub bio: String,
    pub picture: String,
}

/// Transient UI state not owned by any one view.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub auth_form: AuthFormMode,
    /// Album panel; `None` when closed
    pub current_album: Option<Album>,
    pub selected_rating: Option<Rating>,
    pub edit_form: Option<ProfileEditForm>,
}

impl UiState {
    /// Close the album panel and forget the picked rating.
    pub fn close_album(&mut self) {
        self.current_album = None;
        self.selected_rating = None;
    }
}

pub struct App {
    api: MusicboxdApi,
    session: SessionStore,
    pub router: ViewRouter,
    pub ui: UiState,
    pub notifier: Notifier,
    dispatch: DispatchTable,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("active", &self.router.active())
            .field("ui", &self.ui)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Build the app with the reqwest client and the token file.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = ReqwestHttpClient::from_config(config)?;
        let tokens = match &config.token_path {
            Some(path) => FileTokenStore::with_path(path),
            None => FileTokenStore::new()?,
        };
        Ok(Self::with_deps(Arc::new(http), Arc::new(tokens), config))
    }

    /// Build the app from injected adapters.
    pub fn with_deps(
        http: Arc<dyn HttpClient>,
        tokens: Arc<dyn TokenStore>,
        config: &ClientConfig,
    ) -> Self {
        let session = SessionStore::new(tokens);
        let api = MusicboxdApi::new(ApiGateway::new(http, session.shared(), config));
        Self {
            api,
            session,
            router: ViewRouter::new(ActiveView::Auth),
            ui: UiState::default(),
            notifier: Notifier::new(),
            dispatch: DispatchTable::new(),
        }
    }

    /// Restore a persisted session and pick the starting view.
    pub async fn initialize(&mut self) -> RestoreOutcome {
        let outcome = self.session.restore(&self.api).await;
        match outcome {
            RestoreOutcome::Rejected | RestoreOutcome::ProfileUnavailable => {
                self.notifier.error(PROFILE_LOAD_FAILED)
            }
            RestoreOutcome::Authenticated | RestoreOutcome::Unauthenticated => {}
        }
        match outcome.initial_view() {
            ActiveView::Auth => self.router.reset_to_auth(),
            view => {
                let notification = self.router.activate(view, &self.api).await;
                self.notifier.extend(notification);
            }
        }
        tracing::info!(view = %self.router.active(), "Client ready");
        outcome
    }

    pub fn api(&self) -> &MusicboxdApi {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn current_session(&self) -> Session {
        self.session.current().await
    }

    pub fn active_view(&self) -> ActiveView {
        self.router.active()
    }

    pub fn dispatch_table(&self) -> &DispatchTable {
        &self.dispatch
    }

    /// Route `action` through the dispatch table.
    ///
    /// An action with no handler for the active view is refused with an
    /// info notice.
    pub async fn dispatch(&mut self, action: Action) {
        let view = self.router.active();
        let kind = action.kind();
        match self.dispatch.get(view, kind) {
            Some(handler) => {
                tracing::debug!(%view, %kind, "Dispatch");
                handler(self, action).await;
            }
            None => {
                tracing::warn!(%view, %kind, "No handler registered");
                self.notifier
                    .info(format!("'{}' is not available on the {} screen", kind, view));
            }
        }
    }

    /// Turn a handler outcome into a notification.
    pub(crate) fn report(&mut self, result: ClientResult<&str>, fallback: &str) {
        match result {
            Ok(message) => self.notifier.success(message),
            Err(err) => {
                tracing::warn!(code = err.error_code(), "{}", err);
                self.notifier.error(failure_message(&err, fallback));
            }
        }
    }
}

/// Text shown for a failed action: the network notice, a validation message,
/// the server's detail, or `fallback`.
pub fn failure_message(err: &ClientError, fallback: &str) -> String {
    match err {
        ClientError::Api(api) => api_failure_message(api, fallback),
        ClientError::Validation(validation) => validation.user_message(),
        ClientError::Storage(storage) => storage.to_string(),
    }
}

pub fn api_failure_message(err: &ApiError, fallback: &str) -> String {
    if err.is_network() {
        NETWORK_ERROR_NOTICE.to_string()
    } else {
        err.detail_or(fallback)
    }
}
