//! Dispatch table.
//!
//! Every `(view, action)` pair the app responds to is registered here with
//! the handler that runs it. Pairs that aren't registered are refused, which
//! is how the auth screen is limited to login, register and the form toggle.

use futures::future::BoxFuture;
use std::collections::HashMap;

use super::actions::{Action, ActionKind};
use super::App;
use crate::view::ActiveView;

/// An action handler. It receives the action it was registered for.
pub type Handler = for<'a> fn(&'a mut App, Action) -> BoxFuture<'a, ()>;

/// Views available once signed in.
const SIGNED_IN: [ActiveView; 4] = [
    ActiveView::Search,
    ActiveView::Profile,
    ActiveView::Activity,
    ActiveView::Recommendations,
];

/// Views that list albums the panel can open.
const ALBUM_LISTS: [ActiveView; 3] = [
    ActiveView::Search,
    ActiveView::Profile,
    ActiveView::Recommendations,
];

pub struct DispatchTable {
    handlers: HashMap<(ActiveView, ActionKind), Handler>,
}

impl std::fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchTable")
            .field("routes", &self.handlers.len())
            .finish()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The app's full routing.
    pub fn new() -> Self {
        let mut table = Self::empty();

        table.register(ActiveView::Auth, ActionKind::Login, login);
        table.register(ActiveView::Auth, ActionKind::Register, register);
        table.register(ActiveView::Auth, ActionKind::ToggleAuthForm, toggle_auth_form);

        table.register_all(&SIGNED_IN, ActionKind::Logout, logout);
        table.register_all(&SIGNED_IN, ActionKind::Navigate, navigate);
        table.register_all(&SIGNED_IN, ActionKind::Refresh, refresh);
        table.register_all(&SIGNED_IN, ActionKind::SearchUser, search_user);
        table.register_all(&SIGNED_IN, ActionKind::ViewUser, view_user);

        table.register(ActiveView::Search, ActionKind::SetSearchType, set_search_type);
        table.register(ActiveView::Search, ActionKind::Search, search);

        table.register_all(&ALBUM_LISTS, ActionKind::OpenAlbum, open_album);
        table.register_all(&ALBUM_LISTS, ActionKind::CloseAlbum, close_album);
        table.register_all(&ALBUM_LISTS, ActionKind::SelectRating, select_rating);
        table.register_all(&ALBUM_LISTS, ActionKind::SubmitReview, submit_review);
        table.register_all(&ALBUM_LISTS, ActionKind::DeleteReview, delete_review);
        table.register_all(&ALBUM_LISTS, ActionKind::AddFavorite, add_favorite);

        table.register(ActiveView::Profile, ActionKind::SelectProfileTab, select_profile_tab);
        table.register(ActiveView::Profile, ActionKind::ShowFollowers, show_followers);
        table.register(ActiveView::Profile, ActionKind::ShowFollowing, show_following);
        table.register(ActiveView::Profile, ActionKind::Follow, follow);
        table.register(ActiveView::Profile, ActionKind::Unfollow, unfollow);
        table.register(ActiveView::Profile, ActionKind::EditProfile, edit_profile);
        table.register(ActiveView::Profile, ActionKind::UpdateProfile, update_profile);
        table.register(ActiveView::Profile, ActionKind::CancelEdit, cancel_edit);

        table
    }

    pub fn register(&mut self, view: ActiveView, kind: ActionKind, handler: Handler) {
        self.handlers.insert((view, kind), handler);
    }

    fn register_all(&mut self, views: &[ActiveView], kind: ActionKind, handler: Handler) {
        for view in views {
            self.register(*view, kind, handler);
        }
    }

    pub fn get(&self, view: ActiveView, kind: ActionKind) -> Option<Handler> {
        self.handlers.get(&(view, kind)).copied()
    }

    pub fn contains(&self, view: ActiveView, kind: ActionKind) -> bool {
        self.handlers.contains_key(&(view, kind))
    }

    /// Action kinds available on `view`.
    pub fn kinds_for(&self, view: ActiveView) -> Vec<ActionKind> {
        let mut kinds: Vec<ActionKind> = self
            .handlers
            .keys()
            .filter(|(v, _)| *v == view)
            .map(|(_, kind)| *kind)
            .collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds
    }
}

fn login(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::Login { username, password } = action {
            app.login(&username, &password).await;
        }
    })
}

fn register(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::Register {
            username,
            email,
            password,
        } = action
        {
            app.register(&username, &email, &password).await;
        }
    })
}

fn toggle_auth_form(app: &mut App, _action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move { app.toggle_auth_form() })
}

fn logout(app: &mut App, _action: Action) -> BoxFuture<'_, ()> {
    Box::pin(app.logout())
}

fn navigate(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::Navigate(view) = action {
            app.navigate(view).await;
        }
    })
}

fn refresh(app: &mut App, _action: Action) -> BoxFuture<'_, ()> {
    Box::pin(app.refresh())
}

fn search_user(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::SearchUser { username } = action {
            app.search_user(&username).await;
        }
    })
}

fn view_user(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::ViewUser { username } = action {
            app.view_user(&username).await;
        }
    })
}

fn set_search_type(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::SetSearchType(search_type) = action {
            app.set_search_type(search_type);
        }
    })
}

fn search(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::Search { query } = action {
            app.search(&query).await;
        }
    })
}

fn open_album(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::OpenAlbum { index } = action {
            app.open_album_at(index);
        }
    })
}

fn close_album(app: &mut App, _action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move { app.close_album() })
}

fn select_rating(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::SelectRating(value) = action {
            app.select_rating(value);
        }
    })
}

fn submit_review(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::SubmitReview { text } = action {
            app.submit_review(&text).await;
        }
    })
}

fn delete_review(app: &mut App, _action: Action) -> BoxFuture<'_, ()> {
    Box::pin(app.delete_review())
}

fn add_favorite(app: &mut App, _action: Action) -> BoxFuture<'_, ()> {
    Box::pin(app.add_to_favorites())
}

fn select_profile_tab(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::SelectProfileTab(tab) = action {
            app.select_profile_tab(tab).await;
        }
    })
}

fn show_followers(app: &mut App, _action: Action) -> BoxFuture<'_, ()> {
    Box::pin(app.show_followers())
}

fn show_following(app: &mut App, _action: Action) -> BoxFuture<'_, ()> {
    Box::pin(app.show_following())
}

fn follow(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::Follow { user_id } = action {
            app.follow(user_id.as_deref()).await;
        }
    })
}

fn unfollow(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::Unfollow { user_id } = action {
            app.unfollow(user_id.as_deref()).await;
        }
    })
}

fn edit_profile(app: &mut App, _action: Action) -> BoxFuture<'_, ()> {
    Box::pin(app.edit_profile())
}

fn update_profile(app: &mut App, action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        if let Action::UpdateProfile { bio, picture } = action {
            app.update_profile(&bio, &picture).await;
        }
    })
}

fn cancel_edit(app: &mut App, _action: Action) -> BoxFuture<'_, ()> {
    Box::pin(async move { app.cancel_edit() })
}
