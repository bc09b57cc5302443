//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use musicboxd::adapters::mock::{InMemoryTokenStore, MockHttpClient, MockResponse};
use musicboxd::app::App;
use musicboxd::config::ClientConfig;
use serde_json::{json, Value};

pub const BASE: &str = "http://api.test";

/// Absolute URL on the mock API.
pub fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new()
        .with_api_base_url(BASE)
        .with_retry_delay_ms(0)
}

/// App wired to in-memory adapters.
pub fn mock_app(mock: &MockHttpClient, tokens: &InMemoryTokenStore) -> App {
    App::with_deps(
        Arc::new(mock.clone()),
        Arc::new(tokens.clone()),
        &test_config(),
    )
}

pub fn profile_json(username: &str) -> Value {
    json!({
        "id": 7,
        "username": username,
        "bio": "Crate digger",
        "picture": null,
        "followers_count": 3,
        "following_count": 4,
        "reviews": [],
        "favorites": []
    })
}

pub fn album_json(id: &str, name: &str) -> Value {
    json!({
        "album_id": id,
        "album_name": name,
        "artist_name": "Radiohead",
        "artist_id": "4Z8W4fKeB5YxbusRsdQVPb",
        "release_date": "1997-05-21",
        "cover": "https://i.scdn.co/image/ok"
    })
}

/// Serve a successful login and own profile.
pub fn mock_login(mock: &MockHttpClient, token: &str, username: &str) {
    mock.set_response(
        &url("/login"),
        MockResponse::json(200, json!({"access_token": token, "token_type": "bearer"})),
    );
    mock.set_response(&url("/user/profile"), MockResponse::json(200, profile_json(username)));
}

/// App already signed in as `ana` and sitting on the search view.
pub async fn signed_in_app(mock: &MockHttpClient, tokens: &InMemoryTokenStore) -> App {
    tokens.set_token(Some("tok".to_string()));
    mock.set_response(&url("/user/profile"), MockResponse::json(200, profile_json("ana")));
    let mut app = mock_app(mock, tokens);
    app.initialize().await;
    app.notifier.take_unseen();
    mock.clear_requests();
    app
}

/// Messages pushed since the last call.
pub fn messages(app: &mut App) -> Vec<String> {
    app.notifier
        .take_unseen()
        .into_iter()
        .map(|n| n.message)
        .collect()
}
