use async_trait::async_trait;

use super::{ActiveView, LoadState, ViewComponent};
use crate::api::MusicboxdApi;
use crate::models::Album;
use crate::notifications::Notification;

pub const RECOMMENDATIONS_LOAD_FAILED: &str = "Failed to load recommendations";

#[derive(Debug, Default)]
pub struct RecommendationsView {
    pub albums: LoadState<Vec<Album>>,
}

impl RecommendationsView {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ViewComponent for RecommendationsView {
    fn view(&self) -> ActiveView {
        ActiveView::Recommendations
    }

    async fn refresh(&mut self, api: &MusicboxdApi) -> Option<Notification> {
        self.albums = LoadState::Loading;
        match api.recommendations().await {
            Ok(albums) => {
                self.albums = LoadState::from_list(albums);
                None
            }
            Err(err) if err.is_network() => {
                self.albums = LoadState::Error(RECOMMENDATIONS_LOAD_FAILED.to_string());
                Some(Notification::error(RECOMMENDATIONS_LOAD_FAILED))
            }
            Err(err) => {
                tracing::debug!(code = err.error_code(), "Recommendations unavailable");
                self.albums = LoadState::Empty;
                None
            }
        }
    }
}
