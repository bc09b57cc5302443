//! Screens and the router that switches between them.
//!
//! Exactly one [`ActiveView`] is shown at a time. Views that load their own
//! data implement [`ViewComponent`]; the [`ViewRouter`] calls their refresh
//! when they become active.

mod activity;
mod profile;
mod recommendations;
mod router;
mod search;

pub use activity::{ActivityView, ACTIVITY_LOAD_FAILED};
pub use profile::{
    ProfileSubject, ProfileTab, ProfileView, SocialList, SocialListKind, PROFILE_LOAD_FAILED,
    REVIEWS_LOAD_FAILED,
};
pub use recommendations::{RecommendationsView, RECOMMENDATIONS_LOAD_FAILED};
pub use router::ViewRouter;
pub use search::{SearchView, SEARCH_FAILED};

use async_trait::async_trait;

use crate::api::MusicboxdApi;
use crate::notifications::Notification;

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveView {
    Auth,
    Search,
    Profile,
    Activity,
    Recommendations,
}

impl ActiveView {
    pub const ALL: [ActiveView; 5] = [
        ActiveView::Auth,
        ActiveView::Search,
        ActiveView::Profile,
        ActiveView::Activity,
        ActiveView::Recommendations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveView::Auth => "auth",
            ActiveView::Search => "search",
            ActiveView::Profile => "profile",
            ActiveView::Activity => "activity",
            ActiveView::Recommendations => "recommendations",
        }
    }

    /// Whether entering this view triggers a refresh.
    pub fn refreshes_on_activate(&self) -> bool {
        matches!(
            self,
            ActiveView::Profile | ActiveView::Activity | ActiveView::Recommendations
        )
    }
}

impl std::fmt::Display for ActiveView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActiveView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActiveView::ALL
            .into_iter()
            .find(|view| view.as_str() == s.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown view '{}'", s))
    }
}

/// Data state of a view that loads from the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    /// Never loaded
    #[default]
    Idle,
    Loading,
    Populated(T),
    /// Loaded, nothing to show
    Empty,
    /// Load failed; holds the text shown in place of the content
    Error(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LoadState::Empty)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Error(_))
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            LoadState::Populated(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> LoadState<Vec<T>> {
    /// `Empty` for an empty list, `Populated` otherwise.
    pub fn from_list(items: Vec<T>) -> Self {
        if items.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Populated(items)
        }
    }
}

/// A view that owns a data load.
#[async_trait]
pub trait ViewComponent: Send {
    fn view(&self) -> ActiveView;

    /// Reload from the API. Returns a notification when the user should be
    /// told about a failure.
    async fn refresh(&mut self, api: &MusicboxdApi) -> Option<Notification>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refreshing_views() {
        let refreshing: Vec<_> = ActiveView::ALL
            .into_iter()
            .filter(ActiveView::refreshes_on_activate)
            .collect();
        assert_eq!(
            refreshing,
            vec![ActiveView::Profile, ActiveView::Activity, ActiveView::Recommendations]
        );
    }

    #[test]
    fn test_parse_view() {
        assert_eq!("Activity".parse::<ActiveView>(), Ok(ActiveView::Activity));
        assert!("home".parse::<ActiveView>().is_err());
    }

    #[test]
    fn test_load_state_from_list() {
        assert!(LoadState::<Vec<u8>>::from_list(vec![]).is_empty());
        assert_eq!(LoadState::from_list(vec![1]).populated(), Some(&vec![1]));
    }
}
