//! Profile screen.
//!
//! Shows either the signed-in user's own profile, with Favorites and Reviews
//! tabs, or another user's profile opened from search, activity or a social
//! list. Both tabs are backed by a fresh `/user/profile` fetch.

use async_trait::async_trait;

use super::{ActiveView, LoadState, ViewComponent};
use crate::api::MusicboxdApi;
use crate::error::ApiError;
use crate::models::{Album, Review, User, UserSummary};
use crate::notifications::Notification;

pub const PROFILE_LOAD_FAILED: &str = "Failed to load profile";
pub const REVIEWS_LOAD_FAILED: &str = "Failed to load reviews";

/// Whose profile is on screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileSubject {
    #[default]
    Own,
    Other { username: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Favorites,
    Reviews,
}

impl std::str::FromStr for ProfileTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "favorites" | "favourites" => Ok(ProfileTab::Favorites),
            "reviews" => Ok(ProfileTab::Reviews),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialListKind {
    Followers,
    Following,
}

impl SocialListKind {
    pub fn title(&self) -> &'static str {
        match self {
            SocialListKind::Followers => "Followers",
            SocialListKind::Following => "Following",
        }
    }

    /// Notice shown instead of an empty list.
    pub fn empty_message(&self) -> &'static str {
        match self {
            SocialListKind::Followers => "No followers yet",
            SocialListKind::Following => "No following yet",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            SocialListKind::Followers => "Failed to load followers",
            SocialListKind::Following => "Failed to load following",
        }
    }
}

/// Followers or following, shown in place of the tab content.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialList {
    pub kind: SocialListKind,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Default)]
pub struct ProfileView {
    pub subject: ProfileSubject,
    pub tab: ProfileTab,
    pub profile: LoadState<User>,
    pub social: Option<SocialList>,
}

impl ProfileView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_own(&self) -> bool {
        self.subject == ProfileSubject::Own
    }

    /// The loaded user, if any.
    pub fn user(&self) -> Option<&User> {
        self.profile.populated()
    }

    /// Albums on the favorites tab.
    pub fn favorites(&self) -> &[Album] {
        self.user().map(|u| u.favorites.as_slice()).unwrap_or_default()
    }

    pub fn reviews(&self) -> &[Review] {
        self.user().map(|u| u.reviews.as_slice()).unwrap_or_default()
    }

    /// Whether the selected tab has nothing to list.
    pub fn tab_is_empty(&self) -> bool {
        match self.tab {
            ProfileTab::Favorites => self.favorites().is_empty(),
            ProfileTab::Reviews => self.reviews().is_empty(),
        }
    }

    /// Switch to `tab` and reload the own profile.
    ///
    /// Both tabs read from the same endpoint, so the whole profile is
    /// fetched again even though only one list is shown.
    pub async fn select_tab(&mut self, api: &MusicboxdApi, tab: ProfileTab) -> Option<Notification> {
        self.subject = ProfileSubject::Own;
        self.tab = tab;
        self.load_own(api).await
    }

    /// Show another user's already-fetched profile.
    pub fn show_other(&mut self, user: User) {
        self.subject = ProfileSubject::Other {
            username: user.username.clone(),
        };
        self.tab = ProfileTab::Reviews;
        self.social = None;
        self.profile = LoadState::Populated(user);
    }

    /// Show a followers/following list.
    pub fn show_social(&mut self, list: SocialList) {
        self.social = Some(list);
    }

    async fn load_own(&mut self, api: &MusicboxdApi) -> Option<Notification> {
        self.social = None;
        self.profile = LoadState::Loading;
        match api.own_profile().await {
            Ok(user) => {
                self.profile = LoadState::Populated(user);
                None
            }
            Err(err) => self.load_failed(&err),
        }
    }

    fn load_failed(&mut self, err: &ApiError) -> Option<Notification> {
        let message = match self.tab {
            ProfileTab::Favorites => PROFILE_LOAD_FAILED,
            ProfileTab::Reviews => REVIEWS_LOAD_FAILED,
        };
        tracing::warn!(code = err.error_code(), "{}", message);
        self.profile = LoadState::Error(message.to_string());
        err.is_network().then(|| Notification::error(message))
    }
}

#[async_trait]
impl ViewComponent for ProfileView {
    fn view(&self) -> ActiveView {
        ActiveView::Profile
    }

    /// Load the own profile on the favorites tab.
    async fn refresh(&mut self, api: &MusicboxdApi) -> Option<Notification> {
        self.subject = ProfileSubject::Own;
        self.tab = ProfileTab::Favorites;
        self.load_own(api).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(name: &str) -> User {
        serde_json::from_value(json!({
            "id": 2,
            "username": name,
            "reviews": [{"album_name": "Blue", "artist_name": "Joni Mitchell",
                         "cover": "c", "rating": 4, "review": null}],
            "favorites": []
        }))
        .unwrap()
    }

    #[test]
    fn test_show_other() {
        let mut view = ProfileView::new();
        view.show_other(user("ben"));

        assert!(!view.is_own());
        assert_eq!(view.tab, ProfileTab::Reviews);
        assert!(!view.tab_is_empty());
        assert_eq!(view.user().unwrap().username, "ben");
    }

    #[test]
    fn test_empty_favorites_tab() {
        let mut view = ProfileView::new();
        view.profile = LoadState::Populated(user("ana"));
        view.tab = ProfileTab::Favorites;
        assert!(view.tab_is_empty());
        assert!(!view.profile.is_error());
    }

    #[test]
    fn test_parse_tab() {
        assert_eq!("Reviews".parse::<ProfileTab>(), Ok(ProfileTab::Reviews));
        assert!("stats".parse::<ProfileTab>().is_err());
    }

    #[test]
    fn test_social_messages() {
        assert_eq!(SocialListKind::Followers.empty_message(), "No followers yet");
        assert_eq!(SocialListKind::Following.empty_message(), "No following yet");
    }
}
