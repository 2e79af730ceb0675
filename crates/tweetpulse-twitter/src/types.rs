//! Wire types for the v2 recent-search endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tweetpulse_core::PostRecord;

/// Tweet fields requested on every search call.
pub(crate) const TWEET_FIELDS: &str = "created_at,lang,public_metrics";

/// Top-level recent-search envelope. `data` is absent when nothing matched.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<ApiTweet>,
    pub meta: Option<SearchMeta>,
}

#[derive(Debug, Deserialize)]
pub struct SearchMeta {
    pub result_count: Option<u64>,
}

/// One tweet as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTweet {
    pub id: String,
    /// Defaulted to empty rather than failing the whole page on a malformed
    /// item.
    #[serde(default)]
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub lang: Option<String>,
    pub public_metrics: Option<PublicMetrics>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicMetrics {
    pub retweet_count: Option<u64>,
    pub like_count: Option<u64>,
}

impl From<ApiTweet> for PostRecord {
    fn from(tweet: ApiTweet) -> Self {
        let (retweet_count, like_count) = tweet
            .public_metrics
            .map_or((None, None), |m| (m.retweet_count, m.like_count));
        PostRecord {
            id: tweet.id,
            text: tweet.text,
            created_at: tweet.created_at,
            language: tweet.lang,
            retweet_count,
            like_count,
            cleaned_text: None,
            sentiment_label: None,
            sentiment_score: None,
            sentiment_note: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_search_response() {
        let json = r#"{
            "data": [
                {
                    "id": "1790000000000000001",
                    "text": "j'adore ce produit",
                    "created_at": "2024-05-14T09:30:00.000Z",
                    "lang": "fr",
                    "public_metrics": {
                        "retweet_count": 3,
                        "reply_count": 1,
                        "like_count": 12,
                        "quote_count": 0
                    }
                }
            ],
            "meta": { "result_count": 1, "newest_id": "1790000000000000001" }
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.meta.unwrap().result_count, Some(1));
        let tweet = &response.data[0];
        assert_eq!(tweet.id, "1790000000000000001");
        assert_eq!(tweet.lang.as_deref(), Some("fr"));
        assert!(tweet.created_at.is_some());
    }

    #[test]
    fn missing_data_deserializes_to_empty() {
        let json = r#"{ "meta": { "result_count": 0 } }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.data.is_empty());
    }

    #[test]
    fn missing_text_defaults_to_empty_string() {
        let json = r#"{ "data": [ { "id": "42" } ] }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data[0].text, "");
    }

    #[test]
    fn post_record_conversion_maps_metrics() {
        let tweet = ApiTweet {
            id: "7".to_string(),
            text: "hello".to_string(),
            created_at: None,
            lang: Some("en".to_string()),
            public_metrics: Some(PublicMetrics {
                retweet_count: Some(2),
                like_count: Some(9),
            }),
        };
        let record = PostRecord::from(tweet);
        assert_eq!(record.id, "7");
        assert_eq!(record.language.as_deref(), Some("en"));
        assert_eq!(record.retweet_count, Some(2));
        assert_eq!(record.like_count, Some(9));
        assert!(record.cleaned_text.is_none());
        assert!(!record.is_scored());
    }

    #[test]
    fn post_record_conversion_without_metrics() {
        let tweet = ApiTweet {
            id: "8".to_string(),
            text: String::new(),
            created_at: None,
            lang: None,
            public_metrics: None,
        };
        let record = PostRecord::from(tweet);
        assert_eq!(record.retweet_count, None);
        assert_eq!(record.like_count, None);
    }
}
