//! Profile, social graph and profile edit handlers.

use super::{api_failure_message, App, ProfileEditForm, NETWORK_ERROR_NOTICE};
use crate::error::{ClientResult, ValidationError};
use crate::view::{ProfileSubject, ProfileTab, SocialList, SocialListKind, ViewComponent, PROFILE_LOAD_FAILED};

const PROFILE_UPDATED: &str = "Profile updated successfully!";
const PROFILE_UPDATE_FAILED: &str = "Failed to update profile";
const PICTURE_UPDATE_FAILED: &str = "Failed to update profile picture";

impl App {
    /// Switch profile tab. Either tab reloads the whole own profile.
    pub async fn select_profile_tab(&mut self, tab: ProfileTab) {
        let notification = self.router.profile.select_tab(&self.api, tab).await;
        self.notifier.extend(notification);
        self.sync_own_profile().await;
    }

    pub async fn show_followers(&mut self) {
        self.show_social(SocialListKind::Followers).await;
    }

    pub async fn show_following(&mut self) {
        self.show_social(SocialListKind::Following).await;
    }

    /// Load a social list. An empty list is reported instead of shown.
    async fn show_social(&mut self, kind: SocialListKind) {
        let result = match kind {
            SocialListKind::Followers => self.api.followers().await,
            SocialListKind::Following => self.api.following().await,
        };
        match result {
            Ok(users) if users.is_empty() => self.notifier.info(kind.empty_message()),
            Ok(users) => self.router.profile.show_social(SocialList { kind, users }),
            Err(err) => self
                .notifier
                .error(api_failure_message(&err, kind.failure_message())),
        }
    }

    pub async fn follow(&mut self, user_id: Option<&str>) {
        let result = self.try_follow(user_id, true).await;
        self.report(result, "Failed to follow user");
    }

    pub async fn unfollow(&mut self, user_id: Option<&str>) {
        let result = self.try_follow(user_id, false).await;
        self.report(result, "Failed to unfollow user");
    }

    async fn try_follow(&self, user_id: Option<&str>, follow: bool) -> ClientResult<&'static str> {
        let target = match user_id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => self.displayed_other_user_id()?,
        };
        if follow {
            self.api.follow(&target).await?;
            Ok("User followed!")
        } else {
            self.api.unfollow(&target).await?;
            Ok("User unfollowed!")
        }
    }

    fn displayed_other_user_id(&self) -> Result<String, ValidationError> {
        match (&self.router.profile.subject, self.router.profile.user()) {
            (ProfileSubject::Other { .. }, Some(user)) => Ok(user.id.clone()),
            _ => Err(ValidationError::NoUserSelected),
        }
    }

    /// Open the edit form prefilled from the session user.
    pub async fn edit_profile(&mut self) {
        let session = self.session.current().await;
        match session.user() {
            Some(user) => {
                self.ui.edit_form = Some(ProfileEditForm {
                    bio: user.bio.clone().unwrap_or_default(),
                    picture: user.picture_url.clone().unwrap_or_default(),
                });
            }
            None => self.notifier.error(PROFILE_LOAD_FAILED),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.ui.edit_form = None;
    }

    /// Save the bio, then the picture when one is given.
    ///
    /// The bio decides success. A rejected picture is reported on its own
    /// even when the bio was saved.
    pub async fn update_profile(&mut self, bio: &str, picture: &str) {
        let outcome = self.api.update_profile(bio, picture).await;

        match &outcome.bio {
            Ok(()) => {
                self.notifier.success(PROFILE_UPDATED);
                self.ui.edit_form = None;
            }
            Err(err) if err.is_network() => self.notifier.error(NETWORK_ERROR_NOTICE),
            Err(err) => {
                tracing::warn!(code = err.error_code(), "Bio update rejected");
                self.notifier.error(PROFILE_UPDATE_FAILED);
            }
        }
        if let Some(err) = outcome.picture_error() {
            self.notifier
                .error(api_failure_message(err, PICTURE_UPDATE_FAILED));
        }

        if outcome.bio.is_ok() {
            let notification = self.router.profile.refresh(&self.api).await;
            self.notifier.extend(notification);
            if let Some(user) = self.router.profile.user() {
                self.session.update_user(user.clone()).await;
            }
        }
    }
}
