//! Plain-text rendering of each screen.
//!
//! Renderers are pure: state in, text out. They never touch the API.

use std::fmt::Write;

use crate::app::{App, AuthFormMode, ProfileEditForm};
use crate::models::{Album, Rating, Review, User};
use crate::notifications::{Notification, NotificationLevel};
use crate::session::Session;
use crate::view::{
    ActiveView, ActivityView, LoadState, ProfileTab, ProfileView, RecommendationsView, SearchView,
    SocialList,
};

const LOADING: &str = "Loading...";
const NO_BIO: &str = "No bio yet.";

/// Render the active screen plus any open panel or form.
pub fn render_app(app: &App, session: &Session) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_header(app.active_view(), session));

    let body = match app.active_view() {
        ActiveView::Auth => render_auth(app.ui.auth_form),
        ActiveView::Search => render_search(&app.router.search),
        ActiveView::Profile => render_profile(&app.router.profile),
        ActiveView::Activity => render_activity(&app.router.activity),
        ActiveView::Recommendations => render_recommendations(&app.router.recommendations),
    };
    out.push_str(&body);

    if let Some(album) = &app.ui.current_album {
        out.push('\n');
        out.push_str(&render_album_panel(album, app.ui.selected_rating));
    }
    if let Some(form) = &app.ui.edit_form {
        out.push('\n');
        out.push_str(&render_edit_form(form));
    }
    out
}

pub fn render_header(view: ActiveView, session: &Session) -> String {
    match session.user() {
        Some(user) => format!("== {} == (signed in as {})", view, user.username),
        None if session.is_authenticated() => format!("== {} ==", view),
        None => format!("== {} == (signed out)", view),
    }
}

pub fn render_auth(mode: AuthFormMode) -> String {
    match mode {
        AuthFormMode::Login => "Login\n  login <username> <password>\n  toggle (create an account)\n".to_string(),
        AuthFormMode::Register => {
            "Register\n  register <username> <email> <password>\n  toggle (back to login)\n".to_string()
        }
    }
}

pub fn render_search(view: &SearchView) -> String {
    let mut out = format!("Search by {}", view.search_type.as_str());
    if !view.query.is_empty() {
        let _ = write!(out, ": \"{}\"", view.query);
    }
    out.push('\n');
    out.push_str(&render_album_state(&view.results, "No results found", true));
    out
}

pub fn render_recommendations(view: &RecommendationsView) -> String {
    format!(
        "Recommended for you\n{}",
        render_album_state(&view.albums, "No recommendations yet", true)
    )
}

pub fn render_activity(view: &ActivityView) -> String {
    let mut out = String::from("Friends' activity\n");
    match &view.feed {
        LoadState::Idle => {}
        LoadState::Loading => out.push_str(LOADING),
        LoadState::Empty => out.push_str("No activity yet\nFollow users to see their reviews!"),
        LoadState::Error(message) => out.push_str(message),
        LoadState::Populated(reviews) => out.push_str(&render_reviews(reviews)),
    }
    out.push('\n');
    out
}

pub fn render_profile(view: &ProfileView) -> String {
    let user = match &view.profile {
        LoadState::Populated(user) => user,
        LoadState::Loading => return format!("{}\n", LOADING),
        LoadState::Error(message) => return format!("{}\n", message),
        LoadState::Idle | LoadState::Empty => return String::new(),
    };

    let mut out = render_profile_header(user, view.is_own());
    if let Some(list) = &view.social {
        out.push_str(&render_social_list(list));
        return out;
    }

    if !view.is_own() {
        out.push_str("Reviews\n");
        out.push_str(&render_reviews(&user.reviews));
        out.push('\n');
        return out;
    }

    match view.tab {
        ProfileTab::Favorites => {
            out.push_str("[Favorites]  Reviews\n");
            if user.favorites.is_empty() {
                out.push_str("No favorites yet\nStart adding albums to your favorites!\n");
            } else {
                out.push_str(&render_albums(&user.favorites, false));
            }
        }
        ProfileTab::Reviews => {
            out.push_str("Favorites  [Reviews]\n");
            if user.reviews.is_empty() {
                out.push_str("No reviews yet\nStart reviewing albums!\n");
            } else {
                out.push_str(&render_reviews(&user.reviews));
                out.push('\n');
            }
        }
    }
    out
}

fn render_profile_header(user: &User, own: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", user.username);
    if let Some(picture) = &user.picture_url {
        let _ = writeln!(out, "Picture: {}", picture);
    }
    let _ = write!(
        out,
        "{} followers | {} following | {} reviews",
        user.followers_count,
        user.following_count,
        user.reviews.len()
    );
    if own {
        let _ = write!(out, " | {} favorites", user.favorites.len());
    }
    out.push('\n');
    let _ = writeln!(out, "{}", user.bio.as_deref().unwrap_or(NO_BIO));
    out.push('\n');
    out
}

fn render_social_list(list: &SocialList) -> String {
    let mut out = format!("{}\n", list.kind.title());
    for user in &list.users {
        let _ = writeln!(out, "  {}", user.username);
    }
    out
}

fn render_album_state(state: &LoadState<Vec<Album>>, empty: &str, dated: bool) -> String {
    match state {
        LoadState::Idle => String::new(),
        LoadState::Loading => format!("{}\n", LOADING),
        LoadState::Empty => format!("{}\n", empty),
        LoadState::Error(message) => format!("{}\n", message),
        LoadState::Populated(albums) => render_albums(albums, dated),
    }
}

/// Numbered album list; numbers are what `open <n>` takes.
pub fn render_albums(albums: &[Album], dated: bool) -> String {
    let mut out = String::new();
    for (i, album) in albums.iter().enumerate() {
        let _ = write!(out, "{:>3}. {} - {}", i + 1, album.album_name, album.artist_name);
        if dated && !album.release_date.is_empty() {
            let _ = write!(out, " ({})", album.release_date);
        }
        out.push('\n');
    }
    out
}

pub fn render_reviews(reviews: &[Review]) -> String {
    reviews
        .iter()
        .map(render_review)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_review(review: &Review) -> String {
    let mut out = String::new();
    if let Some(username) = &review.username {
        let _ = write!(out, "{} rated ", username);
    }
    let _ = write!(
        out,
        "{} - {}  {}",
        review.album_name,
        review.artist_name,
        review.stars()
    );
    if let Some(text) = review.text() {
        let _ = write!(out, "\n     \"{}\"", text);
    }
    out
}

pub fn render_album_panel(album: &Album, rating: Option<Rating>) -> String {
    let mut out = String::from("-- Album --\n");
    let _ = writeln!(out, "{}", album.album_name);
    let _ = writeln!(out, "Artist: {}", album.artist_name);
    let _ = writeln!(out, "Release Date: {}", album.release_date);
    let _ = writeln!(
        out,
        "Rating: {}",
        rating.map(Rating::stars).unwrap_or_else(|| "☆☆☆☆☆ (none)".to_string())
    );
    out.push_str("  rate <1-5> | review [text] | delete-review | favorite | close\n");
    out
}

fn render_edit_form(form: &ProfileEditForm) -> String {
    format!(
        "-- Edit profile --\nBio: {}\nPicture: {}\n  save-profile <bio> | <picture url>  (or: cancel)\n",
        form.bio, form.picture
    )
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
        NotificationLevel::Info => "info",
    };
    format!("[{}] {}", tag, notification.message)
}
