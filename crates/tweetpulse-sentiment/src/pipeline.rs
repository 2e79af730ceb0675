//! Pipeline orchestration: fetch → normalize → score → merge.

use thiserror::Error;
use tweetpulse_core::{PostRecord, Sentiment};
use tweetpulse_twitter::{CancelToken, RetryPolicy, TwitterClient, TwitterError};

use crate::error::SentimentError;
use crate::resources::AnalysisResources;

/// One collection run's parameters, all externally supplied.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub query: String,
    pub max_results: u32,
    pub retry: RetryPolicy,
}

/// How a run resolved. An empty upstream result is a signal, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Scored { count: usize },
    EmptyResult,
}

/// The scored dataset, owned exclusively by the caller.
#[derive(Debug)]
pub struct PipelineOutput {
    pub records: Vec<PostRecord>,
    pub status: RunStatus,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Twitter(#[from] TwitterError),

    #[error(transparent)]
    Sentiment(#[from] SentimentError),
}

/// Runs the full collection pipeline for one query.
///
/// 1. Fetch posts (retrying per `request.retry`, cancellable).
/// 2. Zero posts → return an empty output with [`RunStatus::EmptyResult`]
///    and a warning log.
/// 3. Attach `cleaned_text` to every record.
/// 4. Batch-score the raw text and merge the sentiment triple onto each
///    record, order preserved one-to-one.
///
/// Re-running with the same query may see different upstream data, but the
/// transforms applied to whatever comes back are deterministic.
///
/// # Errors
///
/// Propagates typed fetch failures ([`TwitterError`]) and scoring failures
/// ([`SentimentError`]); in both cases no partial output is returned.
pub async fn run_pipeline(
    client: &TwitterClient,
    resources: &AnalysisResources,
    request: &PipelineRequest,
    cancel: CancelToken,
) -> Result<PipelineOutput, PipelineError> {
    tracing::info!(
        query = %request.query,
        max_results = request.max_results,
        "starting collection run"
    );
    let mut records = client
        .fetch(&request.query, request.max_results, &request.retry, cancel)
        .await?;

    if records.is_empty() {
        tracing::warn!(query = %request.query, "search returned no posts, empty dataset");
        return Ok(PipelineOutput {
            records,
            status: RunStatus::EmptyResult,
        });
    }
    tracing::info!(count = records.len(), "collected posts");

    resources.normalizer.preprocess_dataset(&mut records);

    // The model is multilingual and noise-tolerant, so it scores the raw
    // text; `cleaned_text` stays a derived column for downstream analysis.
    let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
    let sentiments = resources.scorer.analyze_batch(&texts).await?;

    for (record, sentiment) in records.iter_mut().zip(sentiments) {
        record.apply_sentiment(sentiment);
    }
    let count = records.len();
    tracing::info!(count, "scored posts");

    Ok(PipelineOutput {
        records,
        status: RunStatus::Scored { count },
    })
}

/// Result of the interactive one-text path.
#[derive(Debug, Clone)]
pub struct ScoredText {
    pub sentiment: Sentiment,
    pub cleaned_text: String,
}

/// Scores one raw text for immediate display.
///
/// Skips the fetcher entirely and touches no persisted dataset: the raw
/// string goes to the model, the cleaned form comes back for display.
///
/// # Errors
///
/// Returns [`SentimentError`] if the model call fails.
pub async fn score_text(
    resources: &AnalysisResources,
    text: &str,
) -> Result<ScoredText, SentimentError> {
    let cleaned_text = resources.normalizer.clean(text);
    let sentiment = resources.scorer.analyze(text).await?;
    Ok(ScoredText {
        sentiment,
        cleaned_text,
    })
}
