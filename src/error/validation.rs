//! Client-side validation failures.
//!
//! These are raised before a request is built, so a handler that returns one
//! has issued no network call.

use thiserror::Error;

use super::category::ErrorCategory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A review was submitted before a star rating was picked.
    #[error("Please select a rating")]
    NoRatingSelected,

    #[error("Rating must be between 1 and 5 (got {0})")]
    RatingOutOfRange(u8),

    #[error("Please enter a search term")]
    EmptySearchQuery,

    /// A required form field was left blank.
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),

    /// An album action was triggered with no album panel open.
    #[error("No album selected")]
    NoAlbumSelected,

    /// Follow or unfollow with no other user's profile on screen.
    #[error("Open a user's profile first")]
    NoUserSelected,
}

impl ValidationError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::ValidationGap
    }

    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
