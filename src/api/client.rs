//! Typed endpoints of the musicboxd API.

use serde::de::DeserializeOwned;

use super::gateway::{encode_segment, ApiGateway, RequestBody};
use crate::error::ApiError;
use crate::models::{
    Album, BioUpdate, LoginForm, PictureUpdate, RecommendationsPayload, RegisterRequest, Review,
    ReviewRequest, SearchType, TokenResponse, User, UserSummary,
};
use crate::traits::Method;

/// Result of a profile edit.
///
/// The bio is always sent; the picture only when one was given. Each request
/// succeeds or fails on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdateOutcome {
    pub bio: Result<(), ApiError>,
    /// `None` when no picture was submitted
    pub picture: Option<Result<(), ApiError>>,
}

impl ProfileUpdateOutcome {
    pub fn is_success(&self) -> bool {
        self.bio.is_ok() && !matches!(self.picture, Some(Err(_)))
    }

    /// Bio saved but the picture was rejected.
    pub fn is_partial_failure(&self) -> bool {
        self.bio.is_ok() && matches!(self.picture, Some(Err(_)))
    }

    pub fn picture_error(&self) -> Option<&ApiError> {
        match &self.picture {
            Some(Err(err)) => Some(err),
            _ => None,
        }
    }
}

/// Client for every endpoint the app calls.
#[derive(Debug, Clone)]
pub struct MusicboxdApi {
    gateway: ApiGateway,
}

impl MusicboxdApi {
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.gateway
            .request(Method::Get, path, RequestBody::Empty, true)
            .await?
            .json()
    }

    async fn send_unit(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<(), ApiError> {
        self.gateway.request(method, path, body, true).await.map(|_| ())
    }

    // Auth

    /// POST /register
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.gateway
            .request(Method::Post, "/register", RequestBody::json(request)?, false)
            .await
            .map(|_| ())
    }

    /// POST /login (form-encoded)
    pub async fn login(&self, form: &LoginForm) -> Result<TokenResponse, ApiError> {
        self.gateway
            .request(Method::Post, "/login", RequestBody::Form(form.fields()), false)
            .await?
            .json()
    }

    // Profiles

    /// GET /user/profile
    pub async fn own_profile(&self) -> Result<User, ApiError> {
        self.get_json("/user/profile").await
    }

    /// GET /user/{username}/profile
    pub async fn user_profile(&self, username: &str) -> Result<User, ApiError> {
        self.get_json(&format!("/user/{}/profile", encode_segment(username)))
            .await
    }

    /// GET /user/{username}/search
    ///
    /// Succeeds when the user exists.
    pub async fn find_user(&self, username: &str) -> Result<(), ApiError> {
        self.send_unit(
            Method::Get,
            &format!("/user/{}/search", encode_segment(username)),
            RequestBody::Empty,
        )
        .await
    }

    /// PUT /user/update_bio
    pub async fn update_bio(&self, bio: &str) -> Result<(), ApiError> {
        let body = RequestBody::json(&BioUpdate {
            bio: bio.to_string(),
        })?;
        self.send_unit(Method::Put, "/user/update_bio", body).await
    }

    /// PUT /user/update_picture
    pub async fn update_picture(&self, picture: &str) -> Result<(), ApiError> {
        let body = RequestBody::json(&PictureUpdate {
            picture: picture.to_string(),
        })?;
        self.send_unit(Method::Put, "/user/update_picture", body).await
    }

    /// Update the bio, then the picture when `picture` is non-empty.
    pub async fn update_profile(&self, bio: &str, picture: &str) -> ProfileUpdateOutcome {
        let bio = self.update_bio(bio).await;
        let picture = if picture.trim().is_empty() {
            None
        } else {
            Some(self.update_picture(picture.trim()).await)
        };
        ProfileUpdateOutcome { bio, picture }
    }

    // Social graph

    /// GET /user/get_followers
    pub async fn followers(&self) -> Result<Vec<UserSummary>, ApiError> {
        self.get_json("/user/get_followers").await
    }

    /// GET /user/get_following
    pub async fn following(&self) -> Result<Vec<UserSummary>, ApiError> {
        self.get_json("/user/get_following").await
    }

    /// POST /user/{id}/follow
    pub async fn follow(&self, user_id: &str) -> Result<(), ApiError> {
        self.send_unit(
            Method::Post,
            &format!("/user/{}/follow", encode_segment(user_id)),
            RequestBody::Empty,
        )
        .await
    }

    /// DELETE /user/{id}/unfollow
    pub async fn unfollow(&self, user_id: &str) -> Result<(), ApiError> {
        self.send_unit(
            Method::Delete,
            &format!("/user/{}/unfollow", encode_segment(user_id)),
            RequestBody::Empty,
        )
        .await
    }

    // Feeds

    /// GET /user/friends_activity
    pub async fn friends_activity(&self) -> Result<Vec<Review>, ApiError> {
        self.get_json("/user/friends_activity").await
    }

    /// GET /user/get_recommendations
    pub async fn recommendations(&self) -> Result<Vec<Album>, ApiError> {
        self.get_json::<RecommendationsPayload>("/user/get_recommendations")
            .await
            .map(RecommendationsPayload::into_albums)
    }

    /// GET /search/artist/{q} or /search/album/{q}
    pub async fn search(&self, search_type: SearchType, query: &str) -> Result<Vec<Album>, ApiError> {
        self.get_json(&format!("{}{}", search_type.path_prefix(), encode_segment(query)))
            .await
    }

    // Albums

    /// POST /album/{id}/rating
    pub async fn submit_review(
        &self,
        album_id: &str,
        review: &ReviewRequest,
    ) -> Result<(), ApiError> {
        self.send_unit(
            Method::Post,
            &format!("/album/{}/rating", encode_segment(album_id)),
            RequestBody::json(review)?,
        )
        .await
    }

    /// DELETE /album/{id}/delete_rating
    pub async fn delete_review(&self, album_id: &str) -> Result<(), ApiError> {
        self.send_unit(
            Method::Delete,
            &format!("/album/{}/delete_rating", encode_segment(album_id)),
            RequestBody::Empty,
        )
        .await
    }

    /// POST /album/{id}/add_favorite
    pub async fn add_favorite(&self, album_id: &str) -> Result<(), ApiError> {
        self.send_unit(
            Method::Post,
            &format!("/album/{}/add_favorite", encode_segment(album_id)),
            RequestBody::Empty,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::ClientConfig;
    use crate::models::Rating;
    use crate::session::Session;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn api(mock: &MockHttpClient) -> MusicboxdApi {
        let mut session = Session::default();
        session.set_token("tok");
        let config = ClientConfig::new().with_api_base_url("http://api.test");
        MusicboxdApi::new(ApiGateway::new(
            Arc::new(mock.clone()),
            Arc::new(RwLock::new(session)),
            &config,
        ))
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/search/album/",
            MockResponse::json(200, json!([{"album_id": "x", "album_name": "Ágætis byrjun"}])),
        );

        let albums = api(&mock).search(SearchType::Album, "Ágætis byrjun").await.unwrap();
        assert_eq!(albums.len(), 1);
        assert_eq!(
            mock.get_requests()[0].url,
            "http://api.test/search/album/%C3%81g%C3%A6tis%20byrjun"
        );
    }

    #[tokio::test]
    async fn test_login_parses_token() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/login",
            MockResponse::json(200, json!({"access_token": "abc", "token_type": "bearer"})),
        );

        let token = api(&mock).login(&LoginForm::new("ana", "pw")).await.unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(mock.get_requests()[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_submit_review_body() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({})));

        let review = ReviewRequest {
            rating: Rating::new(5).unwrap(),
            review: "Timeless".to_string(),
        };
        api(&mock).submit_review("a1", &review).await.unwrap();

        let request = &mock.get_requests()[0];
        assert_eq!(request.url, "http://api.test/album/a1/rating");
        assert_eq!(request.method, Method::Post);
        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"rating": 5, "review": "Timeless"}));
    }

    #[tokio::test]
    async fn test_update_profile_skips_empty_picture() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({})));

        let outcome = api(&mock).update_profile("new bio", "  ").await;
        assert!(outcome.is_success());
        assert_eq!(outcome.picture, None);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_update_profile_partial_failure() {
        let mock = MockHttpClient::new();
        mock.set_response("http://api.test/user/update_bio", MockResponse::json(200, json!({})));
        mock.set_response(
            "http://api.test/user/update_picture",
            MockResponse::json(422, json!({"detail": "invalid url"})),
        );

        let outcome = api(&mock).update_profile("bio", "not-a-url").await;
        assert!(outcome.is_partial_failure());
        assert_eq!(outcome.picture_error().unwrap().error_message(), "invalid url");

        let urls: Vec<String> = mock.get_requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://api.test/user/update_bio".to_string(),
                "http://api.test/user/update_picture".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_recommendations_wrapped() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/user/get_recommendations",
            MockResponse::json(200, json!({"recommendations": [{"album_name": "A"}]})),
        );

        let albums = api(&mock).recommendations().await.unwrap();
        assert_eq!(albums[0].album_name, "A");
    }

    #[tokio::test]
    async fn test_unfollow_uses_delete() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::json(200, json!({})));

        api(&mock).unfollow("42").await.unwrap();
        let request = &mock.get_requests()[0];
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "http://api.test/user/42/unfollow");
    }

    #[tokio::test]
    async fn test_invalid_body_is_invalid_response() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::text(200, "<html>"));

        let err = api(&mock).own_profile().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { status: 200, .. }));
    }
}
