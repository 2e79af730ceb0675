//! Shared lifetime of the heavy analysis resources.
//!
//! The normalizer's tables and the scorer handle are built once, shared
//! read-only, and injected into the pipeline rather than reached through
//! ambient globals. [`AnalysisResources::process_wide`] adds a guarded
//! process-wide singleton for hosts that want one instance across runs.

use tokio::sync::OnceCell;
use tweetpulse_core::AppConfig;
use tweetpulse_nlp::{NormalizerOptions, TextNormalizer};

use crate::scorer::SentimentScorer;

/// The normalizer + scorer pair every pipeline run borrows.
///
/// Immutable after construction and `Send + Sync`, so concurrent runs can
/// share one instance freely.
pub struct AnalysisResources {
    pub normalizer: TextNormalizer,
    pub scorer: SentimentScorer,
}

impl AnalysisResources {
    /// Builds a fresh resource set from configuration.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let normalizer = TextNormalizer::new(NormalizerOptions {
            min_token_len: config.min_token_len,
            keep_hashtag_words: config.keep_hashtag_words,
        });
        let scorer =
            SentimentScorer::new(&config.model_url).with_batch_size(config.scoring_batch_size);
        Self { normalizer, scorer }
    }

    /// Returns the process-wide resource set, constructing it on first use.
    ///
    /// Construction is single-writer: concurrent first callers race to one
    /// initialization, the rest wait and then share the result. The first
    /// caller's `config` wins; later configs are ignored.
    pub async fn process_wide(config: &AppConfig) -> &'static Self {
        static RESOURCES: OnceCell<AnalysisResources> = OnceCell::const_new();
        RESOURCES
            .get_or_init(|| async { Self::new(config) })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::PathBuf;

    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            twitter_bearer_token: None,
            model_url: "http://127.0.0.1:9".to_string(),
            default_query: "q".to_string(),
            default_max_results: 10,
            output_path: PathBuf::from("out.csv"),
            fetch_max_attempts: 3,
            rate_limit_backoff_secs: 0,
            transient_backoff_secs: 0,
            min_token_len: 3,
            keep_hashtag_words: true,
            scoring_batch_size: 32,
            request_timeout_secs: 5,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn resources_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalysisResources>();
    }

    #[tokio::test]
    async fn process_wide_returns_the_same_instance() {
        let config = test_config();
        let first = AnalysisResources::process_wide(&config).await;
        let second = AnalysisResources::process_wide(&config).await;
        assert!(std::ptr::eq(first, second));
    }

    #[tokio::test]
    async fn concurrent_first_access_initializes_once() {
        let config = test_config();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let config = config.clone();
                tokio::spawn(async move {
                    let resources = AnalysisResources::process_wide(&config).await;
                    std::ptr::from_ref(resources) as usize
                })
            })
            .collect();
        let mut addresses = HashSet::new();
        for handle in handles {
            addresses.insert(handle.await.unwrap());
        }
        assert_eq!(addresses.len(), 1, "all callers must share one instance");
    }
}
