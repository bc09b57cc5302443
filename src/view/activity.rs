use async_trait::async_trait;

use super::{ActiveView, LoadState, ViewComponent};
use crate::api::MusicboxdApi;
use crate::models::Review;
use crate::notifications::Notification;

pub const ACTIVITY_LOAD_FAILED: &str = "Failed to load activity";

/// Recent reviews by followed users.
#[derive(Debug, Default)]
pub struct ActivityView {
    pub feed: LoadState<Vec<Review>>,
}

impl ActivityView {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ViewComponent for ActivityView {
    fn view(&self) -> ActiveView {
        ActiveView::Activity
    }

    async fn refresh(&mut self, api: &MusicboxdApi) -> Option<Notification> {
        self.feed = LoadState::Loading;
        match api.friends_activity().await {
            Ok(reviews) => {
                self.feed = LoadState::from_list(reviews);
                None
            }
            Err(err) if err.is_network() => {
                self.feed = LoadState::Error(ACTIVITY_LOAD_FAILED.to_string());
                Some(Notification::error(ACTIVITY_LOAD_FAILED))
            }
            Err(err) => {
                tracing::debug!(code = err.error_code(), "Activity unavailable");
                self.feed = LoadState::Empty;
                None
            }
        }
    }
}
