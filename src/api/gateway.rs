//! Request layer shared by every endpoint.
//!
//! [`ApiGateway::request`] joins the base address and path, attaches the
//! session's bearer token when asked to, encodes the body and folds every
//! outcome into `Result<ApiResponse, ApiError>`.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SharedSession;
use crate::traits::{Headers, HttpClient, Method, Response};

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded` pairs (login only)
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Serialize any value as a JSON body.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::InvalidResponse {
                status: 0,
                message: format!("could not encode request body: {}", e),
            })
    }

    fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Json(_) => Some(CONTENT_TYPE_JSON),
            RequestBody::Form(_) => Some(CONTENT_TYPE_FORM),
        }
    }

    fn encode(&self) -> String {
        match self {
            RequestBody::Empty => String::new(),
            RequestBody::Json(value) => value.to_string(),
            RequestBody::Form(pairs) => encode_form(pairs),
        }
    }
}

/// A 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    /// Decode the body as `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::InvalidResponse {
            status: self.status,
            message: e.to_string(),
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl From<Response> for ApiResponse {
    fn from(response: Response) -> Self {
        Self {
            status: response.status,
            body: response.body,
        }
    }
}

/// Percent-encode one path segment.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn encode_form(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// The single outbound path to the API server.
#[derive(Clone)]
pub struct ApiGateway {
    http: Arc<dyn HttpClient>,
    session: SharedSession,
    base_url: String,
    config: ClientConfig,
}

impl std::fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("base_url", &self.base_url)
            .field("get_retries", &self.config.get_retries)
            .finish_non_exhaustive()
    }
}

impl ApiGateway {
    pub fn new(http: Arc<dyn HttpClient>, session: SharedSession, config: &ClientConfig) -> Self {
        Self {
            http,
            session,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            config: config.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue one request.
    ///
    /// With `needs_auth` the current token is sent as a bearer credential; a
    /// missing token doesn't stop the request. Network failures on GET are
    /// retried up to the configured count; nothing else is retried.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        needs_auth: bool,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(path);
        let headers = self.headers(&body, needs_auth).await;
        let payload = body.encode();

        let attempts = if method.is_idempotent_read() {
            self.config.get_retries + 1
        } else {
            1
        };

        let mut attempt = 1;
        let response = loop {
            tracing::debug!(%method, %url, attempt, "API request");
            match self.http.send(method, &url, &payload, &headers).await {
                Ok(response) => break response,
                Err(err) if attempt < attempts => {
                    tracing::warn!(%method, %url, attempt, "Request failed, retrying: {}", err);
                    tokio::time::sleep(self.config.retry_delay(attempt)).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::warn!(%method, %url, "Request failed: {}", err);
                    return Err(err.into());
                }
            }
        };

        if response.is_success() {
            tracing::debug!(%method, %url, status = response.status, "API response");
            Ok(response.into())
        } else {
            let err = ApiError::from_response(&response);
            tracing::warn!(%method, %url, status = response.status, code = err.error_code(), "API rejected request");
            Err(err)
        }
    }

    async fn headers(&self, body: &RequestBody, needs_auth: bool) -> Headers {
        let mut headers = Headers::new();
        if let Some(content_type) = body.content_type() {
            headers.insert("Content-Type".to_string(), content_type.to_string());
        }
        if needs_auth {
            if let Some(token) = self.session.read().await.token() {
                headers.insert("Authorization".to_string(), format!("Bearer {}", token));
            }
        }
        headers
    }
}
