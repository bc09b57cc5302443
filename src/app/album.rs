//! Album panel handlers.

use super::App;
use crate::error::{ClientResult, ValidationError};
use crate::models::{Album, Rating, ReviewRequest};
use crate::view::{ActiveView, ProfileTab};

impl App {
    /// Albums listed on the active screen, in display order.
    pub fn listed_albums(&self) -> &[Album] {
        match self.router.active() {
            ActiveView::Search => self
                .router
                .search
                .results
                .populated()
                .map(Vec::as_slice)
                .unwrap_or_default(),
            ActiveView::Recommendations => self
                .router
                .recommendations
                .albums
                .populated()
                .map(Vec::as_slice)
                .unwrap_or_default(),
            ActiveView::Profile if self.router.profile.tab == ProfileTab::Favorites => {
                self.router.profile.favorites()
            }
            _ => &[],
        }
    }

    /// Open the album at `index` of the list on screen.
    pub fn open_album_at(&mut self, index: usize) {
        match self.listed_albums().get(index).cloned() {
            Some(album) => self.open_album(album),
            None => self
                .notifier
                .error(format!("No album at position {}", index + 1)),
        }
    }

    /// Open the album panel with a fresh rating picker.
    pub fn open_album(&mut self, album: Album) {
        tracing::debug!(album_id = %album.album_id, "Open album");
        self.ui.current_album = Some(album);
        self.ui.selected_rating = None;
    }

    pub fn close_album(&mut self) {
        self.ui.close_album();
    }

    pub fn select_rating(&mut self, value: u8) {
        match Rating::try_from(value) {
            Ok(rating) => self.ui.selected_rating = Some(rating),
            Err(err) => self.notifier.error(err.user_message()),
        }
    }

    /// Submit the picked rating and `text` for the open album.
    ///
    /// Without a picked rating nothing is sent.
    pub async fn submit_review(&mut self, text: &str) {
        let result = self.try_submit_review(text).await;
        if result.is_ok() {
            self.ui.close_album();
        }
        self.report(result, "Failed to submit review");
    }

    async fn try_submit_review(&self, text: &str) -> ClientResult<&'static str> {
        let album_id = self.open_album_id()?;
        let rating = self
            .ui
            .selected_rating
            .ok_or(ValidationError::NoRatingSelected)?;
        let request = ReviewRequest {
            rating,
            review: text.to_string(),
        };
        self.api.submit_review(album_id, &request).await?;
        Ok("Review submitted successfully!")
    }

    pub async fn delete_review(&mut self) {
        let result = self.try_delete_review().await;
        if result.is_ok() {
            self.ui.close_album();
        }
        self.report(result, "Failed to delete review");
    }

    async fn try_delete_review(&self) -> ClientResult<&'static str> {
        let album_id = self.open_album_id()?;
        self.api.delete_review(album_id).await?;
        Ok("Review deleted successfully!")
    }

    /// Add the open album to favorites. The panel and view stay as they are.
    pub async fn add_to_favorites(&mut self) {
        let result = self.try_add_to_favorites().await;
        self.report(result, "Failed to add to favorites");
    }

    async fn try_add_to_favorites(&self) -> ClientResult<&'static str> {
        let album_id = self.open_album_id()?;
        self.api.add_favorite(album_id).await?;
        Ok("Added to favorites!")
    }

    fn open_album_id(&self) -> Result<&str, ValidationError> {
        self.ui
            .current_album
            .as_ref()
            .filter(|album| album.has_id())
            .map(|album| album.album_id.as_str())
            .ok_or(ValidationError::NoAlbumSelected)
    }
}
