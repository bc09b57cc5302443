//! Request bodies and auth payloads.

use serde::{Deserialize, Serialize};

use super::Rating;

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Credentials for `POST /login`, sent form-encoded.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Field pairs in the order the login endpoint expects them.
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

/// Body of `POST /login` on success.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Body of `POST /album/{id}/rating`.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest {
    pub rating: Rating,
    pub review: String,
}

/// Body of `PUT /user/update_bio`.
#[derive(Debug, Clone, Serialize)]
pub struct BioUpdate {
    pub bio: String,
}

/// Body of `PUT /user/update_picture`.
#[derive(Debug, Clone, Serialize)]
pub struct PictureUpdate {
    pub picture: String,
}
