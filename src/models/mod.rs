//! Wire and domain types for the musicboxd API.
//!
//! Field names follow the server's snake_case JSON. Rows the server builds
//! from partial joins omit some fields, so most of them default instead of
//! failing the whole payload.

mod album;
mod request;
mod review;
mod user;

pub use album::{Album, RecommendationsPayload, SearchType};
pub use request::{BioUpdate, LoginForm, PictureUpdate, RegisterRequest, ReviewRequest, TokenResponse};
pub use review::{Rating, Review};
pub use user::{User, UserSummary};

use serde::{Deserialize, Deserializer};

/// Helper to deserialize a nullable string as an empty string.
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Helper to deserialize a string that should be absent when blank.
pub(crate) fn deserialize_blank_as_none<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|opt| opt.filter(|value| !value.trim().is_empty()))
}
