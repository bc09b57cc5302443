use serde::{Deserialize, Serialize};

use super::deserialize_nullable_string;
use crate::error::ValidationError;

/// A star rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        Self::try_from(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Filled and empty stars, e.g. `★★★☆☆`.
    pub fn stars(self) -> String {
        stars(self.0)
    }
}

/// Five stars with `value` of them filled. Values above 5 fill all five.
pub fn stars(value: u8) -> String {
    let filled = usize::from(value.min(Rating::MAX));
    let empty = usize::from(Rating::MAX) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(ValidationError::RatingOutOfRange(value))
        }
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Rating::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A review row as listed on profiles and in the activity feed.
///
/// The activity feed also names the reviewer; profile rows don't. Stored
/// ratings may be 0, so rows carry the raw value rather than a [`Rating`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub album_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub album_name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub artist_name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string", rename = "cover")]
    pub cover_url: String,
    pub rating: u8,
    #[serde(default, rename = "review")]
    pub review_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Review {
    pub fn stars(&self) -> String {
        stars(self.rating)
    }

    /// Review text, or `None` when it is blank.
    pub fn text(&self) -> Option<&str> {
        self.review_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
        assert_eq!(Rating::new(6), Err(ValidationError::RatingOutOfRange(6)));
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(Rating::new(3).unwrap().stars(), "★★★☆☆");
        assert_eq!(Rating::new(5).unwrap().stars(), "★★★★★");
    }

    #[test]
    fn test_rating_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_review_row() {
        let json = r#"{"album_name": "Blue", "artist_name": "Joni Mitchell",
                       "cover": "c.jpg", "rating": 4, "review": "  "}"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.rating, 4);
        assert_eq!(review.album_id, "");
        assert_eq!(review.text(), None);
        assert_eq!(review.username, None);
    }

    #[test]
    fn test_review_row_with_zero_rating() {
        let json = r#"{"album_name": "Blue", "artist_name": "Joni Mitchell",
                       "cover": "c.jpg", "rating": 0, "review": "meh"}"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.rating, 0);
        assert_eq!(review.stars(), "☆☆☆☆☆");
    }

    #[test]
    fn test_stars_clamped() {
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn test_activity_row_with_reviewer() {
        let json = r#"{"username": "ana", "album_name": "Blue", "artist_name": "Joni Mitchell",
                       "cover": "c.jpg", "rating": 5, "review": "Perfect"}"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.username.as_deref(), Some("ana"));
        assert_eq!(review.text(), Some("Perfect"));
    }
}
