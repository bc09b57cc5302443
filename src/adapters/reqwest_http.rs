//! Reqwest-based HTTP client adapter.
//!
//! The production [`HttpClient`]: one shared `reqwest::Client` carrying the
//! configured timeout and a `musicboxd/<version>` user agent.

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::traits::{Headers, HttpClient, HttpError, Method, Response};

const USER_AGENT: &str = concat!("musicboxd/", env!("CARGO_PKG_VERSION"));

/// HTTP client implementation using reqwest.
///
/// Non-2xx statuses come back as ordinary [`Response`]s; only failures to
/// complete the exchange become [`HttpError`]s.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Client with reqwest's defaults (no timeout).
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Client using the configured request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(transport_error)?;
        Ok(Self { client })
    }

    fn builder(&self, method: Method, url: &str, body: &str) -> reqwest::RequestBuilder {
        match method {
            Method::Get => self.client.get(url),
            Method::Delete => self.client.delete(url),
            Method::Post => self.client.post(url).body(body.to_string()),
            Method::Put => self.client.put(url).body(body.to_string()),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a reqwest failure.
fn transport_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else if err.is_connect() {
        HttpError::ConnectionFailed(err.to_string())
    } else if err.is_builder() {
        HttpError::InvalidUrl(err.to_string())
    } else if err.is_body() || err.is_decode() {
        HttpError::Io(err.to_string())
    } else {
        HttpError::Other(err.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::Get, url, "", headers).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::Post, url, body, headers).await
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::Put, url, body, headers).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::Delete, url, "", headers).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let request = headers
            .iter()
            .fold(self.builder(method, url, body), |builder, (key, value)| {
                builder.header(key, value)
            });

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;

        Ok(Response::new(status, body))
    }
}
