//! API gateway error type.
//!
//! [`ApiError`] is the failure half of every gateway call. It keeps the two
//! things a handler branches on: whether the server was reached at all
//! (`status()` is `None` when it was not) and the message to show.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::{HttpError, Response};

/// Message used when the server gives no usable `detail`.
pub const GENERIC_FAILURE: &str = "request failed";

/// Message reported for every transport-level failure.
pub const NETWORK_FAILURE: &str = "network error";

/// Failure of a single API exchange.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request could not be delivered or the response could not be read.
    #[error("network error: {message}")]
    Network { message: String },

    /// Non-2xx response other than 401.
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE))]
    Server { status: u16, detail: Option<String> },

    /// HTTP 401: the bearer token is missing, expired or invalid.
    #[error("HTTP 401: {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE))]
    Unauthorized { detail: Option<String> },

    /// 2xx response whose body does not match the expected shape.
    #[error("invalid response (HTTP {status}): {message}")]
    InvalidResponse { status: u16, message: String },
}

impl ApiError {
    /// Classify a non-2xx response.
    pub fn from_response(response: &Response) -> Self {
        let detail = extract_detail(&response.body);
        if response.status == 401 {
            ApiError::Unauthorized { detail }
        } else {
            ApiError::Server {
                status: response.status,
                detail,
            }
        }
    }

    /// HTTP status, or `None` when the server was never reached.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network { .. } => None,
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::InvalidResponse { status, .. } => Some(*status),
        }
    }

    /// The server's `detail` text, if it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } | ApiError::Unauthorized { detail } => {
                detail.as_deref()
            }
            _ => None,
        }
    }

    /// Message for the failure: the server's detail, else a generic fallback.
    pub fn error_message(&self) -> String {
        match self {
            ApiError::Network { .. } => NETWORK_FAILURE.to_string(),
            ApiError::InvalidResponse { .. } => "invalid response".to_string(),
            _ => self.detail().unwrap_or(GENERIC_FAILURE).to_string(),
        }
    }

    /// The server's detail, or `fallback` when there is none.
    pub fn detail_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    /// Category in the client error taxonomy.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Network { .. } => ErrorCategory::NetworkFailure,
            ApiError::Server { .. } | ApiError::InvalidResponse { .. } => {
                ErrorCategory::ServerRejection
            }
            ApiError::Unauthorized { .. } => ErrorCategory::AuthFailure,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Network { .. } => "E_API_NET",
            ApiError::Server { .. } => "E_API_STATUS",
            ApiError::Unauthorized { .. } => "E_API_AUTH",
            ApiError::InvalidResponse { .. } => "E_API_INVALID",
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        ApiError::Network {
            message: err.to_string(),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// FastAPI-style servers send either `{"detail": "text"}` or, for request
/// validation failures, `{"detail": [{"msg": "text", ...}, ...]}`.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(text) if !text.is_empty() => Some(text.clone()),
        serde_json::Value::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(|msg| msg.as_str())
            .map(str::to_string),
        _ => None,
    }
}
