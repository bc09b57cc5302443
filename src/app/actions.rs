//! User gestures as data.
//!
//! The shell (or any other front end) turns input into an [`Action`]; the
//! dispatch table routes it by `(ActiveView, ActionKind)`.

use crate::models::SearchType;
use crate::view::{ActiveView, ProfileTab};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Auth
    Login { username: String, password: String },
    Register { username: String, email: String, password: String },
    ToggleAuthForm,
    Logout,

    // Navigation
    Navigate(ActiveView),
    Refresh,

    // Search
    SetSearchType(SearchType),
    Search { query: String },
    SearchUser { username: String },

    // Album panel
    /// Open the album at this 0-based position of the list on screen
    OpenAlbum { index: usize },
    CloseAlbum,
    SelectRating(u8),
    SubmitReview { text: String },
    DeleteReview,
    AddFavorite,

    // Profile
    SelectProfileTab(ProfileTab),
    ShowFollowers,
    ShowFollowing,
    ViewUser { username: String },
    /// `None` targets the user whose profile is on screen
    Follow { user_id: Option<String> },
    Unfollow { user_id: Option<String> },
    EditProfile,
    UpdateProfile { bio: String, picture: String },
    CancelEdit,
}

/// Payload-free discriminant of [`Action`], used as a dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Login,
    Register,
    ToggleAuthForm,
    Logout,
    Navigate,
    Refresh,
    SetSearchType,
    Search,
    SearchUser,
    OpenAlbum,
    CloseAlbum,
    SelectRating,
    SubmitReview,
    DeleteReview,
    AddFavorite,
    SelectProfileTab,
    ShowFollowers,
    ShowFollowing,
    ViewUser,
    Follow,
    Unfollow,
    EditProfile,
    UpdateProfile,
    CancelEdit,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Login { .. } => ActionKind::Login,
            Action::Register { .. } => ActionKind::Register,
            Action::ToggleAuthForm => ActionKind::ToggleAuthForm,
            Action::Logout => ActionKind::Logout,
            Action::Navigate(_) => ActionKind::Navigate,
            Action::Refresh => ActionKind::Refresh,
            Action::SetSearchType(_) => ActionKind::SetSearchType,
            Action::Search { .. } => ActionKind::Search,
            Action::SearchUser { .. } => ActionKind::SearchUser,
            Action::OpenAlbum { .. } => ActionKind::OpenAlbum,
            Action::CloseAlbum => ActionKind::CloseAlbum,
            Action::SelectRating(_) => ActionKind::SelectRating,
            Action::SubmitReview { .. } => ActionKind::SubmitReview,
            Action::DeleteReview => ActionKind::DeleteReview,
            Action::AddFavorite => ActionKind::AddFavorite,
            Action::SelectProfileTab(_) => ActionKind::SelectProfileTab,
            Action::ShowFollowers => ActionKind::ShowFollowers,
            Action::ShowFollowing => ActionKind::ShowFollowing,
            Action::ViewUser { .. } => ActionKind::ViewUser,
            Action::Follow { .. } => ActionKind::Follow,
            Action::Unfollow { .. } => ActionKind::Unfollow,
            Action::EditProfile => ActionKind::EditProfile,
            Action::UpdateProfile { .. } => ActionKind::UpdateProfile,
            Action::CancelEdit => ActionKind::CancelEdit,
        }
    }
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Login => "login",
            ActionKind::Register => "register",
            ActionKind::ToggleAuthForm => "toggle",
            ActionKind::Logout => "logout",
            ActionKind::Navigate => "go",
            ActionKind::Refresh => "refresh",
            ActionKind::SetSearchType => "type",
            ActionKind::Search => "search",
            ActionKind::SearchUser => "find",
            ActionKind::OpenAlbum => "open",
            ActionKind::CloseAlbum => "close",
            ActionKind::SelectRating => "rate",
            ActionKind::SubmitReview => "review",
            ActionKind::DeleteReview => "delete-review",
            ActionKind::AddFavorite => "favorite",
            ActionKind::SelectProfileTab => "tab",
            ActionKind::ShowFollowers => "followers",
            ActionKind::ShowFollowing => "following",
            ActionKind::ViewUser => "user",
            ActionKind::Follow => "follow",
            ActionKind::Unfollow => "unfollow",
            ActionKind::EditProfile => "edit",
            ActionKind::UpdateProfile => "save-profile",
            ActionKind::CancelEdit => "cancel",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(
            Action::Search {
                query: "Blue".to_string()
            }
            .kind(),
            ActionKind::Search
        );
        assert_eq!(
            Action::Follow { user_id: None }.kind(),
            ActionKind::Follow
        );
        assert_eq!(ActionKind::DeleteReview.to_string(), "delete-review");
    }
}
