use thiserror::Error;

/// Errors returned by the search API client and its retry wrapper.
#[derive(Debug, Error)]
pub enum TwitterError {
    /// Network or TLS failure from the underlying HTTP client, including 5xx
    /// statuses surfaced through `error_for_status`.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered 429. `reset_after_secs` is taken from the
    /// `Retry-After` / `x-rate-limit-reset` headers when present.
    #[error("rate limited by the search API")]
    RateLimited { reset_after_secs: Option<u64> },

    /// Non-retryable API rejection: bad credentials, malformed query, etc.
    #[error("search API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL does not parse.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The rate-limit signal persisted past the configured attempt budget.
    #[error("rate limit persisted past {attempts} attempts")]
    RateLimitExhausted {
        attempts: u32,
        #[source]
        source: Box<TwitterError>,
    },

    /// Transient connectivity failures persisted past the attempt budget.
    #[error("connectivity failure persisted past {attempts} attempts")]
    ConnectivityExhausted {
        attempts: u32,
        #[source]
        source: Box<TwitterError>,
    },

    /// The caller cancelled the fetch while it was waiting out a backoff.
    #[error("fetch cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}
