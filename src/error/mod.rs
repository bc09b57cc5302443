//! Error handling for the musicboxd client.
//!
//! - [`ApiError`]: failure of a gateway exchange (network, status, auth)
//! - [`ValidationError`]: input rejected before any request is sent
//! - [`StorageError`]: durable token storage failures
//! - [`ClientError`]: the union handlers work with
//!
//! | Category | Source | Effect |
//! |----------|--------|--------|
//! | NetworkFailure | transport error | notification |
//! | ServerRejection | non-2xx / bad body | notification |
//! | AuthFailure | HTTP 401 | notification, or forced logout during profile validation |
//! | ValidationGap | client-side check | notification, no request |

mod api;
mod category;
mod storage;
mod validation;

pub use api::{extract_detail, ApiError, GENERIC_FAILURE, NETWORK_FAILURE};
pub use category::ErrorCategory;
pub use storage::StorageError;
pub use validation::ValidationError;

use thiserror::Error;

/// Unified error type for handler code paths.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// Category used by handlers to decide how to surface the error.
    ///
    /// Storage failures only happen on the local machine and are reported as
    /// server-independent rejections of the operation.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Api(err) => err.category(),
            ClientError::Validation(err) => err.category(),
            ClientError::Storage(_) => ErrorCategory::ServerRejection,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Api(err) => err.error_code(),
            ClientError::Validation(_) => "E_VALIDATION",
            ClientError::Storage(err) => err.error_code(),
        }
    }
}

/// Type alias for handler results.
pub type ClientResult<T> = Result<T, ClientError>;
