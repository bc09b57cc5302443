use serde::{Deserialize, Deserializer, Serialize};

use super::{deserialize_blank_as_none, deserialize_nullable_string, Album, Review};

/// A full profile snapshot from `/user/profile` or `/user/{username}/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub bio: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_blank_as_none",
        rename = "picture"
    )]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub reviews: Vec<Review>,
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub favorites: Vec<Album>,
}

/// One row of a followers or following list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "deserialize_nullable_string")]
    pub username: String,
    #[serde(
        default,
        deserialize_with = "deserialize_blank_as_none",
        rename = "picture"
    )]
    pub picture_url: Option<String>,
}

/// User ids arrive as numbers from some deployments and strings from others.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

fn deserialize_nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}
