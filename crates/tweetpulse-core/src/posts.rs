//! Collected post records and their derived sentiment fields.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// One collected post, flowing through the pipeline as fields are derived.
///
/// The raw fields (`id` through `like_count`) come from the upstream search
/// API; `cleaned_text` is attached by the normalizer and the three
/// `sentiment_*` fields are attached together by
/// [`PostRecord::apply_sentiment`]. Field order here is the column contract
/// of the persisted dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    /// Opaque stable identifier, unique upstream.
    pub id: String,
    /// Raw post text. Upstream nulls are coerced to the empty string.
    #[serde(default)]
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub language: Option<String>,
    pub retweet_count: Option<u64>,
    pub like_count: Option<u64>,
    /// Set iff the record has passed through the normalizer.
    pub cleaned_text: Option<String>,
    pub sentiment_label: Option<String>,
    pub sentiment_score: Option<f32>,
    pub sentiment_note: Option<StarRating>,
}

impl PostRecord {
    /// Attaches the three sentiment fields as one atomic derivation.
    pub fn apply_sentiment(&mut self, sentiment: Sentiment) {
        self.sentiment_score = Some(sentiment.score);
        self.sentiment_note = Some(sentiment.stars);
        self.sentiment_label = Some(sentiment.label);
    }

    /// True once the record carries the full sentiment triple.
    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.sentiment_label.is_some()
            && self.sentiment_score.is_some()
            && self.sentiment_note.is_some()
    }
}

/// One model verdict: the raw label, its confidence, and the parsed rating.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentiment {
    pub label: String,
    pub score: f32,
    pub stars: StarRating,
}

/// Star rating parsed from the model's `"<n> stars"` label grammar.
///
/// Downstream code works with this tagged enum; the string label is parsed
/// exactly once, at the model boundary. `One` is most negative, `Five` most
/// positive. Serializes as the integer 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StarRating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl StarRating {
    /// Parses a model label of the form `"<n> star"` / `"<n> stars"`.
    ///
    /// Returns `None` for anything outside that grammar; callers treat that
    /// as an internal-consistency failure rather than coercing a default.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let mut parts = label.split_whitespace();
        let stars: u8 = parts.next()?.parse().ok()?;
        match parts.next()? {
            "star" | "stars" => {}
            _ => return None,
        }
        if parts.next().is_some() {
            return None;
        }
        Self::from_stars(stars)
    }

    #[must_use]
    pub fn from_stars(stars: u8) -> Option<Self> {
        match stars {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "1 star"),
            other => write!(f, "{} stars", other.as_u8()),
        }
    }
}

impl Serialize for StarRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for StarRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stars = u8::deserialize(deserializer)?;
        Self::from_stars(stars)
            .ok_or_else(|| de::Error::custom(format!("star rating out of range: {stars}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_label_parses_plural_form() {
        assert_eq!(StarRating::from_label("5 stars"), Some(StarRating::Five));
        assert_eq!(StarRating::from_label("3 stars"), Some(StarRating::Three));
    }

    #[test]
    fn from_label_parses_singular_form() {
        assert_eq!(StarRating::from_label("1 star"), Some(StarRating::One));
    }

    #[test]
    fn from_label_rejects_out_of_range() {
        assert_eq!(StarRating::from_label("0 stars"), None);
        assert_eq!(StarRating::from_label("6 stars"), None);
    }

    #[test]
    fn from_label_rejects_foreign_grammar() {
        assert_eq!(StarRating::from_label("positive"), None);
        assert_eq!(StarRating::from_label("stars 4"), None);
        assert_eq!(StarRating::from_label("4 stars extra"), None);
        assert_eq!(StarRating::from_label(""), None);
    }

    #[test]
    fn display_round_trips_through_from_label() {
        for stars in 1..=5u8 {
            let rating = StarRating::from_stars(stars).unwrap();
            assert_eq!(StarRating::from_label(&rating.to_string()), Some(rating));
        }
    }

    #[test]
    fn star_rating_serializes_as_integer() {
        let json = serde_json::to_string(&StarRating::Four).unwrap();
        assert_eq!(json, "4");
        let back: StarRating = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StarRating::Four);
    }

    #[test]
    fn star_rating_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<StarRating>("9").is_err());
    }

    fn bare_record() -> PostRecord {
        PostRecord {
            id: "1".to_string(),
            text: "some text".to_string(),
            created_at: None,
            language: None,
            retweet_count: None,
            like_count: None,
            cleaned_text: None,
            sentiment_label: None,
            sentiment_score: None,
            sentiment_note: None,
        }
    }

    #[test]
    fn apply_sentiment_sets_all_three_fields() {
        let mut record = bare_record();
        assert!(!record.is_scored());
        record.apply_sentiment(Sentiment {
            label: "4 stars".to_string(),
            score: 0.91,
            stars: StarRating::Four,
        });
        assert!(record.is_scored());
        assert_eq!(record.sentiment_label.as_deref(), Some("4 stars"));
        assert_eq!(record.sentiment_score, Some(0.91));
        assert_eq!(record.sentiment_note, Some(StarRating::Four));
    }
}
