//! HTTP client for the Twitter/X v2 recent-search endpoint.
//!
//! Wraps `reqwest` with bearer-token auth, typed response deserialization,
//! and status-code mapping into [`TwitterError`]. The resilient entry point
//! is [`TwitterClient::fetch`]; [`TwitterClient::search_recent`] is one raw
//! attempt with no retry.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Response, StatusCode, Url};
use tweetpulse_core::PostRecord;

use crate::cancel::CancelToken;
use crate::error::TwitterError;
use crate::retry::{fetch_with_retry, RetryPolicy};
use crate::types::{ApiTweet, SearchResponse, TWEET_FIELDS};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";
const SEARCH_PATH: &str = "2/tweets/search/recent";

/// The API only accepts 10..=100 results per search call.
const MAX_RESULTS_RANGE: (u32, u32) = (10, 100);

/// Client for the v2 recent-search API.
///
/// Use [`TwitterClient::new`] for production or
/// [`TwitterClient::with_base_url`] to point at a mock server in tests.
pub struct TwitterClient {
    client: Client,
    bearer_token: String,
    search_url: Url,
}

impl TwitterClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`TwitterError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(bearer_token: &str, timeout_secs: u64) -> Result<Self, TwitterError> {
        Self::with_base_url(bearer_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TwitterError::Http`] if the HTTP client cannot be
    /// constructed, or [`TwitterError::InvalidUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        bearer_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, TwitterError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tweetpulse/0.1 (sentiment-pipeline)")
            .build()?;

        // Normalise to exactly one trailing slash so join() appends the
        // search path instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|base| base.join(SEARCH_PATH))
            .map_err(|e| TwitterError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            bearer_token: bearer_token.to_owned(),
            search_url,
        })
    }

    /// Collects posts for `query`, retrying per `policy`, and converts them
    /// into [`PostRecord`]s ready for the pipeline.
    ///
    /// # Errors
    ///
    /// - [`TwitterError::RateLimitExhausted`] / [`TwitterError::ConnectivityExhausted`]
    ///   once the attempt budget is spent on a retryable failure.
    /// - [`TwitterError::Cancelled`] if `cancel` fires during a backoff wait.
    /// - [`TwitterError::Api`] immediately on a non-retryable rejection.
    pub async fn fetch(
        &self,
        query: &str,
        max_results: u32,
        policy: &RetryPolicy,
        mut cancel: CancelToken,
    ) -> Result<Vec<PostRecord>, TwitterError> {
        let tweets = fetch_with_retry(policy, &mut cancel, || {
            self.search_recent(query, max_results)
        })
        .await?;
        Ok(tweets.into_iter().map(PostRecord::from).collect())
    }

    /// One raw search attempt.
    ///
    /// An empty result page is `Ok(vec![])`, not an error.
    ///
    /// # Errors
    ///
    /// - [`TwitterError::RateLimited`] on a 429.
    /// - [`TwitterError::Api`] on any other 4xx (auth failure, bad query).
    /// - [`TwitterError::Http`] on 5xx or transport failure.
    /// - [`TwitterError::Deserialize`] if the body has an unexpected shape.
    pub async fn search_recent(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<ApiTweet>, TwitterError> {
        let url = self.build_search_url(query, max_results);

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TwitterError::RateLimited {
                reset_after_secs: reset_after_secs(&response),
            });
        }
        if status.is_client_error() {
            let message = response.text().await.unwrap_or_default();
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let response = response.error_for_status()?;

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| TwitterError::Deserialize {
                context: format!("search_recent(query={query})"),
                source: e,
            })?;

        Ok(parsed.data)
    }

    fn build_search_url(&self, query: &str, max_results: u32) -> Url {
        let clamped = max_results.clamp(MAX_RESULTS_RANGE.0, MAX_RESULTS_RANGE.1);
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            pairs.append_pair("max_results", &clamped.to_string());
            pairs.append_pair("tweet.fields", TWEET_FIELDS);
        }
        url
    }
}

/// Seconds until the quota window resets, from `Retry-After` or the
/// epoch-stamped `x-rate-limit-reset` header.
fn reset_after_secs(response: &Response) -> Option<u64> {
    let headers = response.headers();
    if let Some(retry_after) = headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
    {
        return Some(retry_after);
    }
    let reset_epoch = headers
        .get("x-rate-limit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())?;
    let now = Utc::now().timestamp();
    u64::try_from(reset_epoch.saturating_sub(now)).ok()
}
