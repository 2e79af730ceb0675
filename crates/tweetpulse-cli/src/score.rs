//! The `score` command: interactive one-text scoring.

use tweetpulse_core::AppConfig;
use tweetpulse_sentiment::{score_text, AnalysisResources};

pub async fn run(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let resources = AnalysisResources::process_wide(config).await;
    let scored = score_text(resources, text).await?;

    println!(
        "sentiment:  {} ({}/5)",
        scored.sentiment.label,
        scored.sentiment.stars.as_u8()
    );
    println!("confidence: {:.4}", scored.sentiment.score);
    println!("cleaned:    {}", scored.cleaned_text);
    Ok(())
}
