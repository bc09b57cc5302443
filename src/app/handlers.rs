//! Auth, navigation and search handlers.

use super::{api_failure_message, App, AuthFormMode};
use crate::error::{ClientResult, ValidationError};
use crate::models::{LoginForm, RegisterRequest, SearchType};
use crate::view::{ActiveView, PROFILE_LOAD_FAILED, SEARCH_FAILED};

const USER_NOT_FOUND: &str = "User not found";
const USER_PROFILE_FAILED: &str = "Failed to load user profile";

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

impl App {
    // Auth

    /// Log in, load the profile and move to search.
    ///
    /// A rejected profile load right after login clears the session again.
    /// Search is only shown while the session survives.
    pub async fn login(&mut self, username: &str, password: &str) {
        if let Err(err) = require(username, "username").and(require(password, "password")) {
            self.notifier.error(err.user_message());
            return;
        }

        let token = match self.api.login(&LoginForm::new(username.trim(), password)).await {
            Ok(token) => token,
            Err(err) => {
                self.notifier.error(api_failure_message(&err, "Login failed"));
                return;
            }
        };

        if let Err(err) = self.session.store_token(&token.access_token).await {
            tracing::warn!("Token not persisted: {}", err);
        }
        self.notifier.success("Login successful!");

        if self.session.validate(&self.api).await.is_err() {
            self.notifier.error(PROFILE_LOAD_FAILED);
            if !self.session.is_authenticated().await {
                self.ui = Default::default();
                self.router.reset_to_auth();
                return;
            }
        }

        self.ui.auth_form = AuthFormMode::Login;
        if self.session.is_authenticated().await {
            self.navigate(ActiveView::Search).await;
        }
    }

    pub async fn register(&mut self, username: &str, email: &str, password: &str) {
        let result = self.try_register(username, email, password).await;
        if result.is_ok() {
            self.ui.auth_form = AuthFormMode::Login;
        }
        self.report(result, "Registration failed");
    }

    async fn try_register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<&'static str> {
        require(username, "username")?;
        require(email, "email")?;
        require(password, "password")?;

        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.api.register(&request).await?;
        Ok("Registration successful! Please login.")
    }

    pub fn toggle_auth_form(&mut self) {
        self.ui.auth_form = match self.ui.auth_form {
            AuthFormMode::Login => AuthFormMode::Register,
            AuthFormMode::Register => AuthFormMode::Login,
        };
    }

    pub async fn logout(&mut self) {
        self.session.logout(&mut self.router).await;
        self.ui = Default::default();
        self.notifier.success("Logged out successfully");
    }

    // Navigation

    /// Switch screens. `Auth` is only reachable through logout.
    pub async fn navigate(&mut self, view: ActiveView) {
        if view == ActiveView::Auth {
            self.notifier.info("Log out to return to the login screen");
            return;
        }
        let notification = self.router.activate(view, &self.api).await;
        self.notifier.extend(notification);
        self.sync_own_profile().await;
    }

    /// Reload the active screen.
    pub async fn refresh(&mut self) {
        let view = self.router.active();
        self.navigate(view).await;
    }

    /// Copy a freshly loaded own profile into the session.
    pub(crate) async fn sync_own_profile(&mut self) {
        if self.router.active() != ActiveView::Profile || !self.router.profile.is_own() {
            return;
        }
        if let Some(user) = self.router.profile.user() {
            self.session.update_user(user.clone()).await;
        }
    }

    // Search

    pub fn set_search_type(&mut self, search_type: SearchType) {
        self.router.search.set_search_type(search_type);
    }

    pub async fn search(&mut self, query: &str) {
        match self.router.search.search(&self.api, query).await {
            Ok(notification) => self.notifier.extend(notification),
            Err(err) => self.notifier.error(err.user_message()),
        }
    }

    /// Check the user exists, then show their profile.
    pub async fn search_user(&mut self, username: &str) {
        if let Err(err) = require(username, "username") {
            self.notifier.error(err.user_message());
            return;
        }
        match self.api.find_user(username.trim()).await {
            Ok(()) => self.view_user(username.trim()).await,
            Err(err) if err.is_network() => {
                self.notifier.error(SEARCH_FAILED);
            }
            Err(_) => self.notifier.error(USER_NOT_FOUND),
        }
    }

    /// Show another user's profile.
    pub async fn view_user(&mut self, username: &str) {
        if let Err(err) = self.router.show_other_user(&self.api, username).await {
            self.notifier
                .error(api_failure_message(&err, USER_PROFILE_FAILED));
        }
    }
}
