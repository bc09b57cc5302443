use crate::api::MusicboxdApi;
use crate::error::ValidationError;
use crate::models::{Album, SearchType};
use crate::notifications::Notification;

use super::LoadState;

pub const SEARCH_FAILED: &str = "Search failed. Please try again.";

/// Catalogue search. Not refreshed on activation; results stay until the
/// next search.
#[derive(Debug, Default)]
pub struct SearchView {
    pub search_type: SearchType,
    pub query: String,
    pub results: LoadState<Vec<Album>>,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_search_type(&mut self, search_type: SearchType) {
        self.search_type = search_type;
    }

    /// Run a search with the current search type.
    ///
    /// A blank query is rejected before any request. A rejected search shows
    /// the empty state; a network failure shows the error state and notifies.
    pub async fn search(
        &mut self,
        api: &MusicboxdApi,
        query: &str,
    ) -> Result<Option<Notification>, ValidationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::EmptySearchQuery);
        }

        self.query = query.to_string();
        self.results = LoadState::Loading;
        let notification = match api.search(self.search_type, query).await {
            Ok(albums) => {
                tracing::debug!(count = albums.len(), search_type = self.search_type.as_str(), "Search results");
                self.results = LoadState::from_list(albums);
                None
            }
            Err(err) if err.is_network() => {
                self.results = LoadState::Error("Search failed".to_string());
                Some(Notification::error(SEARCH_FAILED))
            }
            Err(_) => {
                self.results = LoadState::Empty;
                None
            }
        };
        Ok(notification)
    }

    /// Album at `index` (0-based) in the current results.
    pub fn result(&self, index: usize) -> Option<&Album> {
        self.results.populated().and_then(|albums| albums.get(index))
    }
}
