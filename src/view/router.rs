//! View routing.
//!
//! `activate` is the only way to change screens apart from the forced return
//! to `Auth` on logout. There is no back-stack.

use super::{
    ActiveView, ActivityView, ProfileView, RecommendationsView, SearchView, ViewComponent,
};
use crate::api::MusicboxdApi;
use crate::error::ApiError;
use crate::notifications::Notification;

#[derive(Debug)]
pub struct ViewRouter {
    active: ActiveView,
    pub search: SearchView,
    pub profile: ProfileView,
    pub activity: ActivityView,
    pub recommendations: RecommendationsView,
}

impl ViewRouter {
    pub fn new(initial: ActiveView) -> Self {
        Self {
            active: initial,
            search: SearchView::new(),
            profile: ProfileView::new(),
            activity: ActivityView::new(),
            recommendations: RecommendationsView::new(),
        }
    }

    pub fn active(&self) -> ActiveView {
        self.active
    }

    /// Make `view` active and refresh it if it loads its own data.
    pub async fn activate(&mut self, view: ActiveView, api: &MusicboxdApi) -> Option<Notification> {
        self.set_active(view);
        match self.component_mut(view) {
            Some(component) => component.refresh(api).await,
            None => None,
        }
    }

    /// Return to the auth screen and drop everything loaded for the
    /// previous session.
    pub fn reset_to_auth(&mut self) {
        self.set_active(ActiveView::Auth);
        self.search = SearchView::new();
        self.profile = ProfileView::new();
        self.activity = ActivityView::new();
        self.recommendations = RecommendationsView::new();
    }

    /// Fetch another user's profile and show it.
    ///
    /// The profile view is activated without its own-profile refresh, so the
    /// other user stays on screen. On failure the active view is unchanged.
    pub async fn show_other_user(
        &mut self,
        api: &MusicboxdApi,
        username: &str,
    ) -> Result<(), ApiError> {
        let user = api.user_profile(username).await?;
        self.profile.show_other(user);
        self.set_active(ActiveView::Profile);
        Ok(())
    }

    fn set_active(&mut self, view: ActiveView) {
        if self.active != view {
            tracing::debug!(from = %self.active, to = %view, "View change");
        }
        self.active = view;
    }

    fn component_mut(&mut self, view: ActiveView) -> Option<&mut dyn ViewComponent> {
        match view {
            ActiveView::Profile => Some(&mut self.profile),
            ActiveView::Activity => Some(&mut self.activity),
            ActiveView::Recommendations => Some(&mut self.recommendations),
            ActiveView::Auth | ActiveView::Search => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::ApiGateway;
    use crate::config::ClientConfig;
    use crate::session::Session;
    use crate::view::{LoadState, ProfileSubject};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn api(mock: &MockHttpClient) -> MusicboxdApi {
        let config = ClientConfig::new().with_api_base_url("http://api.test");
        MusicboxdApi::new(ApiGateway::new(
            Arc::new(mock.clone()),
            Arc::new(RwLock::new(Session::default())),
            &config,
        ))
    }

    #[tokio::test]
    async fn test_search_and_auth_do_not_refresh() {
        let mock = MockHttpClient::new();
        let mut router = ViewRouter::new(ActiveView::Auth);

        assert!(router.activate(ActiveView::Search, &api(&mock)).await.is_none());
        assert_eq!(router.active(), ActiveView::Search);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_activity_refresh_states() {
        let mock = MockHttpClient::new();
        let url = "http://api.test/user/friends_activity";
        let api = api(&mock);
        let mut router = ViewRouter::new(ActiveView::Search);

        mock.queue_response(url, MockResponse::json(200, json!([])));
        router.activate(ActiveView::Activity, &api).await;
        assert!(router.activity.feed.is_empty());

        mock.queue_response(url, MockResponse::json(500, json!({})));
        assert!(router.activate(ActiveView::Activity, &api).await.is_none());
        assert!(router.activity.feed.is_empty());

        mock.queue_response(url, MockResponse::connection_refused());
        let notification = router.activate(ActiveView::Activity, &api).await.unwrap();
        assert_eq!(notification.message, "Failed to load activity");
        assert!(router.activity.feed.is_error());
    }

    #[tokio::test]
    async fn test_recommendations_populated() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/user/get_recommendations",
            MockResponse::json(200, json!([{"album_id": "a", "album_name": "A"}])),
        );
        let mut router = ViewRouter::new(ActiveView::Search);

        router.activate(ActiveView::Recommendations, &api(&mock)).await;
        assert_eq!(router.active(), ActiveView::Recommendations);
        assert_eq!(router.recommendations.albums.populated().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_other_user_not_overwritten() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/user/ben/profile",
            MockResponse::json(200, json!({"id": 9, "username": "ben"})),
        );
        let mut router = ViewRouter::new(ActiveView::Search);

        router.show_other_user(&api(&mock), "ben").await.unwrap();
        assert_eq!(router.active(), ActiveView::Profile);
        assert_eq!(
            router.profile.subject,
            ProfileSubject::Other {
                username: "ben".to_string()
            }
        );
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_other_user_failure_keeps_view() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(404, json!({"detail": "User not found"})));
        let mut router = ViewRouter::new(ActiveView::Activity);

        let err = router.show_other_user(&api(&mock), "ghost").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(router.active(), ActiveView::Activity);
        assert_eq!(router.profile.profile, LoadState::Idle);
    }

    #[test]
    fn test_reset_to_auth_clears_views() {
        let mut router = ViewRouter::new(ActiveView::Profile);
        router.activity.feed = LoadState::Empty;
        router.search.query = "Blue".to_string();

        router.reset_to_auth();
        assert_eq!(router.active(), ActiveView::Auth);
        assert_eq!(router.activity.feed, LoadState::Idle);
        assert!(router.search.query.is_empty());
    }
}
