use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub twitter_bearer_token: Option<String>,
    pub model_url: String,
    pub default_query: String,
    pub default_max_results: u32,
    pub output_path: PathBuf,
    pub fetch_max_attempts: u32,
    pub rate_limit_backoff_secs: u64,
    pub transient_backoff_secs: u64,
    pub min_token_len: usize,
    pub keep_hashtag_words: bool,
    pub scoring_batch_size: usize,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "twitter_bearer_token",
                &self.twitter_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field("model_url", &self.model_url)
            .field("default_query", &self.default_query)
            .field("default_max_results", &self.default_max_results)
            .field("output_path", &self.output_path)
            .field("fetch_max_attempts", &self.fetch_max_attempts)
            .field("rate_limit_backoff_secs", &self.rate_limit_backoff_secs)
            .field("transient_backoff_secs", &self.transient_backoff_secs)
            .field("min_token_len", &self.min_token_len)
            .field("keep_hashtag_words", &self.keep_hashtag_words)
            .field("scoring_batch_size", &self.scoring_batch_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
