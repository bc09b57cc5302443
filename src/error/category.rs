//! Error category classification.
//!
//! Every failure a handler can observe falls into one of four categories,
//! which decide whether it becomes a notification or a session transition.

use std::fmt;

/// High-level categorization of client failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The server could not be reached (DNS, refused connection, timeout).
    NetworkFailure,

    /// The server answered with a non-2xx status or an unreadable body.
    ServerRejection,

    /// The server rejected the bearer token (HTTP 401).
    AuthFailure,

    /// Input was rejected on the client before any request was sent.
    ValidationGap,
}

impl ErrorCategory {
    /// Returns true if repeating the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::NetworkFailure)
    }

    /// Returns true if the request never left the client.
    pub fn is_client_side(&self) -> bool {
        matches!(self, ErrorCategory::ValidationGap)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::NetworkFailure => "network",
            ErrorCategory::ServerRejection => "server",
            ErrorCategory::AuthFailure => "auth",
            ErrorCategory::ValidationGap => "validation",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
