use serde::{Deserialize, Serialize};

use super::deserialize_nullable_string;

/// An album as returned by search, favorites and recommendations.
///
/// Identity is `album_id`. Favorites rows from the profile endpoint carry no
/// id; those albums deserialize with an empty `album_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Album {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub album_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub album_name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub artist_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub release_date: String,
    /// Cover image URL
    #[serde(default, deserialize_with = "deserialize_nullable_string", rename = "cover")]
    pub cover_url: String,
}

impl Album {
    /// Whether album actions (review, favorite) can target this album.
    pub fn has_id(&self) -> bool {
        !self.album_id.is_empty()
    }
}

/// Which catalogue search endpoint to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchType {
    #[default]
    Artist,
    Album,
}

impl SearchType {
    /// Path prefix of the search endpoint.
    pub fn path_prefix(&self) -> &'static str {
        match self {
            SearchType::Artist => "/search/artist/",
            SearchType::Album => "/search/album/",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Artist => "artist",
            SearchType::Album => "album",
        }
    }
}

impl std::str::FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "artist" | "artists" => Ok(SearchType::Artist),
            "album" | "albums" => Ok(SearchType::Album),
            other => Err(format!("unknown search type '{}'", other)),
        }
    }
}

/// Body of `GET /user/get_recommendations`.
///
/// The endpoint returns a bare array; older deployments wrap it as
/// `{"recommendations": [...]}`. Both shapes are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecommendationsPayload {
    List(Vec<Album>),
    Wrapped { recommendations: Vec<Album> },
}

impl RecommendationsPayload {
    pub fn into_albums(self) -> Vec<Album> {
        match self {
            RecommendationsPayload::List(albums) => albums,
            RecommendationsPayload::Wrapped { recommendations } => recommendations,
        }
    }
}
