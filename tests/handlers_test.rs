//! User-gesture handlers against the in-memory HTTP mock.

mod common;

use common::*;
use musicboxd::adapters::mock::{InMemoryTokenStore, MockHttpClient, MockResponse};
use musicboxd::models::SearchType;
use musicboxd::traits::Method;
use musicboxd::view::{ActiveView, LoadState, ProfileSubject, ProfileTab, SocialListKind};
use serde_json::json;

async fn app_with_search_results(mock: &MockHttpClient) -> musicboxd::app::App {
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(mock, &tokens).await;
    mock.set_response(
        &url("/search/album/"),
        MockResponse::json(200, json!([album_json("a1", "OK Computer"), album_json("a2", "Kid A")])),
    );
    app.set_search_type(SearchType::Album);
    app.search("radiohead").await;
    mock.clear_requests();
    app
}

#[tokio::test]
async fn test_search_populates_results() {
    let mock = MockHttpClient::new();
    let app = app_with_search_results(&mock).await;

    let albums = app.router.search.results.populated().unwrap();
    assert_eq!(albums.len(), 2);
    assert_eq!(albums[1].album_name, "Kid A");
}

#[tokio::test]
async fn test_empty_search_sends_nothing() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;

    app.search("   ").await;

    assert_eq!(mock.request_count(), 0);
    assert_eq!(messages(&mut app), vec!["Please enter a search term"]);
}

#[tokio::test]
async fn test_search_rejected_and_network_failure() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;

    mock.queue_response(
        &url("/search/artist/nobody"),
        MockResponse::json(404, json!({"detail": "Artist not found"})),
    );
    app.search("nobody").await;
    assert!(app.router.search.results.is_empty());
    assert!(messages(&mut app).is_empty());

    mock.queue_response(&url("/search/artist/nobody"), MockResponse::connection_refused());
    app.search("nobody").await;
    assert!(app.router.search.results.is_error());
    assert_eq!(messages(&mut app), vec!["Search failed. Please try again."]);
}

#[tokio::test]
async fn test_submit_review_without_rating_sends_nothing() {
    let mock = MockHttpClient::new();
    let mut app = app_with_search_results(&mock).await;
    app.open_album_at(0);

    app.submit_review("Masterpiece").await;

    assert_eq!(mock.request_count(), 0);
    assert_eq!(messages(&mut app), vec!["Please select a rating"]);
    assert!(app.ui.current_album.is_some());
}

#[tokio::test]
async fn test_submit_review_success_closes_panel() {
    let mock = MockHttpClient::new();
    let mut app = app_with_search_results(&mock).await;
    mock.set_response(&url("/album/a2/rating"), MockResponse::json(200, json!({})));

    app.open_album_at(1);
    app.select_rating(4);
    app.submit_review("Everything in its right place").await;

    let request = &mock.requests_to(&url("/album/a2/rating"))[0];
    assert_eq!(request.header("Authorization"), Some("Bearer tok"));
    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"rating": 4, "review": "Everything in its right place"}));

    assert_eq!(messages(&mut app), vec!["Review submitted successfully!"]);
    assert!(app.ui.current_album.is_none());
    assert!(app.ui.selected_rating.is_none());
}

#[tokio::test]
async fn test_rating_out_of_range_is_rejected() {
    let mock = MockHttpClient::new();
    let mut app = app_with_search_results(&mock).await;
    app.open_album_at(0);

    app.select_rating(0);
    app.select_rating(6);

    assert!(app.ui.selected_rating.is_none());
    assert_eq!(messages(&mut app).len(), 2);
}

#[tokio::test]
async fn test_review_rejected_keeps_panel_open() {
    let mock = MockHttpClient::new();
    let mut app = app_with_search_results(&mock).await;
    mock.set_response(
        &url("/album/a1/rating"),
        MockResponse::json(400, json!({"detail": "You already reviewed this album"})),
    );

    app.open_album_at(0);
    app.select_rating(5);
    app.submit_review("").await;

    assert_eq!(messages(&mut app), vec!["You already reviewed this album"]);
    assert!(app.ui.current_album.is_some());
    assert!(app.ui.selected_rating.is_some());
}

#[tokio::test]
async fn test_add_to_favorites_keeps_view() {
    let mock = MockHttpClient::new();
    let mut app = app_with_search_results(&mock).await;
    mock.set_method_response(
        Method::Post,
        &url("/album/a1/add_favorite"),
        MockResponse::json(200, json!({"message": "ok"})),
    );

    app.open_album_at(0);
    app.add_to_favorites().await;

    assert_eq!(messages(&mut app), vec!["Added to favorites!"]);
    assert_eq!(app.active_view(), ActiveView::Search);
    assert!(app.ui.current_album.is_some());
}

#[tokio::test]
async fn test_add_to_favorites_failure_uses_fallback() {
    let mock = MockHttpClient::new();
    let mut app = app_with_search_results(&mock).await;
    mock.set_response(&url("/album/a1/add_favorite"), MockResponse::text(500, "oops"));

    app.open_album_at(0);
    app.add_to_favorites().await;

    assert_eq!(messages(&mut app), vec!["Failed to add to favorites"]);
}

#[tokio::test]
async fn test_delete_review_network_error() {
    let mock = MockHttpClient::new();
    let mut app = app_with_search_results(&mock).await;
    mock.set_response(&url("/album/a1/delete_rating"), MockResponse::connection_refused());

    app.open_album_at(0);
    app.delete_review().await;

    assert_eq!(messages(&mut app), vec!["Network error. Please try again."]);
}

#[tokio::test]
async fn test_open_album_out_of_range() {
    let mock = MockHttpClient::new();
    let mut app = app_with_search_results(&mock).await;

    app.open_album_at(5);

    assert!(app.ui.current_album.is_none());
    assert_eq!(messages(&mut app), vec!["No album at position 6"]);
}

#[tokio::test]
async fn test_search_user_not_found() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;
    mock.set_response(
        &url("/user/ghost/search"),
        MockResponse::json(404, json!({"detail": "User not found"})),
    );

    app.search_user("ghost").await;

    assert_eq!(messages(&mut app), vec!["User not found"]);
    assert_eq!(app.active_view(), ActiveView::Search);
}

#[tokio::test]
async fn test_search_user_shows_other_profile() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;
    mock.set_response(&url("/user/ben/search"), MockResponse::json(200, json!({"username": "ben"})));
    mock.set_response(&url("/user/ben/profile"), MockResponse::json(200, profile_json("ben")));

    app.search_user("ben").await;

    assert_eq!(app.active_view(), ActiveView::Profile);
    assert_eq!(
        app.router.profile.subject,
        ProfileSubject::Other {
            username: "ben".to_string()
        }
    );
    assert!(mock.requests_to(&url("/user/profile")).is_empty());
}

#[tokio::test]
async fn test_follow_displayed_user() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;
    mock.set_response(&url("/user/ben/profile"), MockResponse::json(200, profile_json("ben")));
    mock.set_response(&url("/user/7/follow"), MockResponse::json(200, json!({})));
    mock.set_response(
        &url("/user/7/unfollow"),
        MockResponse::json(400, json!({"detail": "Not following this user"})),
    );

    app.view_user("ben").await;
    app.follow(None).await;
    app.unfollow(None).await;

    assert_eq!(
        messages(&mut app),
        vec!["User followed!", "Not following this user"]
    );
    assert_eq!(mock.requests_to(&url("/user/7/follow"))[0].method, Method::Post);
    assert_eq!(mock.requests_to(&url("/user/7/unfollow"))[0].method, Method::Delete);
}

#[tokio::test]
async fn test_follow_without_target() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;

    app.follow(None).await;

    assert_eq!(mock.request_count(), 0);
    assert_eq!(messages(&mut app), vec!["Open a user's profile first"]);
}

#[tokio::test]
async fn test_empty_followers_notifies() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;
    mock.set_response(&url("/user/get_followers"), MockResponse::json(200, json!([])));
    mock.set_response(
        &url("/user/get_following"),
        MockResponse::json(200, json!([{"username": "ben"}, {"username": "cleo"}])),
    );
    app.navigate(ActiveView::Profile).await;

    app.show_followers().await;
    assert_eq!(messages(&mut app), vec!["No followers yet"]);
    assert!(app.router.profile.social.is_none());

    app.show_following().await;
    let list = app.router.profile.social.as_ref().unwrap();
    assert_eq!(list.kind, SocialListKind::Following);
    assert_eq!(list.users.len(), 2);
}

#[tokio::test]
async fn test_each_tab_refetches_profile() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;
    app.navigate(ActiveView::Profile).await;

    app.select_profile_tab(ProfileTab::Reviews).await;
    app.select_profile_tab(ProfileTab::Favorites).await;

    assert_eq!(mock.requests_to(&url("/user/profile")).len(), 3);
    assert_eq!(app.router.profile.tab, ProfileTab::Favorites);
}

#[tokio::test]
async fn test_update_profile_partial_failure() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;
    app.navigate(ActiveView::Profile).await;
    app.edit_profile().await;
    assert_eq!(app.ui.edit_form.as_ref().unwrap().bio, "Crate digger");

    mock.set_response(&url("/user/update_bio"), MockResponse::json(200, json!({})));
    mock.set_response(
        &url("/user/update_picture"),
        MockResponse::json(422, json!({"detail": [{"msg": "invalid or missing URL scheme"}]})),
    );
    app.update_profile("New bio", "not a url").await;

    assert_eq!(
        messages(&mut app),
        vec!["Profile updated successfully!", "invalid or missing URL scheme"]
    );
    assert!(app.ui.edit_form.is_none());
    assert!(matches!(app.router.profile.profile, LoadState::Populated(_)));
}

#[tokio::test]
async fn test_update_profile_bio_rejected() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;
    app.navigate(ActiveView::Profile).await;
    app.edit_profile().await;
    mock.set_response(&url("/user/update_bio"), MockResponse::json(500, json!({})));

    app.update_profile("New bio", "").await;

    assert_eq!(messages(&mut app), vec!["Failed to update profile"]);
    assert!(app.ui.edit_form.is_some());
    assert!(mock.requests_to(&url("/user/update_picture")).is_empty());
}

#[tokio::test]
async fn test_activity_failure_is_error_state() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;
    mock.set_response(&url("/user/friends_activity"), MockResponse::connection_refused());

    app.navigate(ActiveView::Activity).await;

    assert!(app.router.activity.feed.is_error());
    assert_eq!(messages(&mut app), vec!["Failed to load activity"]);
}

#[tokio::test]
async fn test_activity_feed_with_zero_rating() {
    let mock = MockHttpClient::new();
    let tokens = InMemoryTokenStore::new();
    let mut app = signed_in_app(&mock, &tokens).await;
    mock.set_response(
        &url("/user/friends_activity"),
        MockResponse::json(
            200,
            json!([
                {"username": "ben", "album_name": "Kid A", "artist_name": "Radiohead",
                 "cover": "c", "rating": 0, "review": null},
                {"username": "cleo", "album_name": "Blue", "artist_name": "Joni Mitchell",
                 "cover": "c", "rating": 5, "review": "Perfect"}
            ]),
        ),
    );

    app.navigate(ActiveView::Activity).await;

    let feed = app.router.activity.feed.populated().unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].stars(), "☆☆☆☆☆");
    assert!(messages(&mut app).is_empty());
}
