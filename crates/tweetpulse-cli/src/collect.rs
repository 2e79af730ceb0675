//! The `collect` command: full pipeline run ending in a CSV dataset.

use std::path::PathBuf;
use std::time::Duration;

use tweetpulse_core::{AppConfig, ConfigError};
use tweetpulse_sentiment::{
    run_pipeline, write_dataset, AnalysisResources, PipelineRequest, RunStatus,
};
use tweetpulse_twitter::{cancellation, RetryPolicy, TwitterClient};

pub async fn run(
    config: &AppConfig,
    query: Option<String>,
    max_results: Option<u32>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Fail on a missing credential here, before any network call.
    let token = config
        .twitter_bearer_token
        .clone()
        .ok_or_else(|| ConfigError::MissingEnvVar("TWITTER_BEARER_TOKEN".to_string()))?;

    let client = TwitterClient::new(&token, config.request_timeout_secs)?;
    let resources = AnalysisResources::process_wide(config).await;

    let request = PipelineRequest {
        query: query.unwrap_or_else(|| config.default_query.clone()),
        max_results: max_results.unwrap_or(config.default_max_results),
        retry: RetryPolicy {
            max_attempts: config.fetch_max_attempts,
            rate_limit_backoff: Duration::from_secs(config.rate_limit_backoff_secs),
            transient_backoff: Duration::from_secs(config.transient_backoff_secs),
        },
    };
    let output_path = output.unwrap_or_else(|| config.output_path.clone());

    // Ctrl-C interrupts a long backoff wait instead of letting it run out.
    let (handle, cancel) = cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling the run");
            handle.cancel();
        }
    });

    let result = run_pipeline(&client, resources, &request, cancel).await?;
    match result.status {
        RunStatus::EmptyResult => {
            tracing::warn!(query = %request.query, "no posts collected, nothing written");
            println!("no posts matched the query; no dataset written");
        }
        RunStatus::Scored { count } => {
            write_dataset(&output_path, &result.records)?;
            tracing::info!(count, path = %output_path.display(), "dataset written");
            println!(
                "wrote {count} scored posts to {}",
                output_path.display()
            );
        }
    }
    Ok(())
}
