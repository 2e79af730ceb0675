//! HTTP client for the multilingual star-rating inference server.
//!
//! The server loads the heavy model once and exposes `POST /predict` taking
//! `{"inputs": [...]}` and returning one `{"label": "<n> stars", "score":
//! <f32>}` per input, in input order.

use serde::{Deserialize, Serialize};
use tweetpulse_core::{Sentiment, StarRating};

use crate::error::SentimentError;

/// Maximum number of texts per /predict call.
const DEFAULT_BATCH_SIZE: usize = 32;

/// Fixed verdict for empty text: the model never sees it.
pub const NEUTRAL_LABEL: &str = "3 stars";
pub const NEUTRAL_SCORE: f32 = 0.5;

/// Client for the star-rating inference server.
pub struct SentimentScorer {
    client: reqwest::Client,
    url: String,
    batch_size: usize,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a [&'a str],
}

#[derive(Deserialize)]
struct Prediction {
    label: String,
    score: f32,
}

impl SentimentScorer {
    /// Create a new `SentimentScorer` pointed at `model_url`.
    #[must_use]
    pub fn new(model_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/predict", model_url.trim_end_matches('/')),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Overrides the sub-batch size. Purely a throughput knob: output order
    /// and values never depend on it.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn neutral() -> Sentiment {
        Sentiment {
            label: NEUTRAL_LABEL.to_string(),
            score: NEUTRAL_SCORE,
            stars: StarRating::Three,
        }
    }

    /// Scores one text.
    ///
    /// Empty or all-whitespace text gets the fixed neutral verdict without a
    /// server round-trip; an explicit edge-case policy, not a model output.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Inference`] on transport/contract failures
    /// and [`SentimentError::ModelParse`] on an out-of-grammar label.
    pub async fn analyze(&self, text: &str) -> Result<Sentiment, SentimentError> {
        if text.trim().is_empty() {
            return Ok(Self::neutral());
        }
        let mut sentiments = self.predict(&[text]).await?;
        Ok(sentiments.remove(0))
    }

    /// Scores a batch of texts, preserving length and order exactly.
    ///
    /// Non-empty texts are sent to the server in chunks of `batch_size`;
    /// empty texts get the neutral verdict in place. For every index `i`,
    /// `analyze_batch(texts)[i]` equals `analyze(texts[i])`.
    ///
    /// # Errors
    ///
    /// Same as [`SentimentScorer::analyze`]; the first failing sub-batch
    /// aborts the call.
    pub async fn analyze_batch(
        &self,
        texts: &[&str],
    ) -> Result<Vec<Sentiment>, SentimentError> {
        let mut results: Vec<Sentiment> = texts.iter().map(|_| Self::neutral()).collect();
        let pending: Vec<usize> = texts
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(i, _)| i)
            .collect();

        for chunk in pending.chunks(self.batch_size) {
            let inputs: Vec<&str> = chunk.iter().map(|&i| texts[i]).collect();
            let sentiments = self.predict(&inputs).await?;
            for (&i, sentiment) in chunk.iter().zip(sentiments) {
                results[i] = sentiment;
            }
        }
        Ok(results)
    }

    /// One raw /predict round-trip for a non-empty chunk.
    async fn predict(&self, inputs: &[&str]) -> Result<Vec<Sentiment>, SentimentError> {
        let request = PredictRequest { inputs };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SentimentError::Inference(format!("model request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::Inference(format!(
                "model server returned status {}",
                response.status()
            )));
        }

        let predictions: Vec<Prediction> = response
            .json()
            .await
            .map_err(|e| SentimentError::Inference(format!("model response parse error: {e}")))?;

        if predictions.len() != inputs.len() {
            return Err(SentimentError::Inference(format!(
                "model returned {} predictions for {} inputs",
                predictions.len(),
                inputs.len()
            )));
        }

        predictions
            .into_iter()
            .map(|prediction| {
                let stars = StarRating::from_label(&prediction.label).ok_or_else(|| {
                    SentimentError::ModelParse {
                        label: prediction.label.clone(),
                    }
                })?;
                Ok(Sentiment {
                    label: prediction.label,
                    score: prediction.score,
                    stars,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_text_is_neutral_without_a_server() {
        // Deliberately unroutable URL: the early return must win.
        let scorer = SentimentScorer::new("http://127.0.0.1:1");
        let sentiment = scorer.analyze("").await.unwrap();
        assert_eq!(sentiment.label, "3 stars");
        assert_eq!(sentiment.score, 0.5);
        assert_eq!(sentiment.stars, StarRating::Three);
    }

    #[tokio::test]
    async fn whitespace_text_is_neutral_without_a_server() {
        let scorer = SentimentScorer::new("http://127.0.0.1:1");
        let sentiment = scorer.analyze(" \t\n ").await.unwrap();
        assert_eq!(sentiment.label, "3 stars");
    }

    #[tokio::test]
    async fn all_empty_batch_never_contacts_the_server() {
        let scorer = SentimentScorer::new("http://127.0.0.1:1");
        let sentiments = scorer.analyze_batch(&["", "  ", "\n"]).await.unwrap();
        assert_eq!(sentiments.len(), 3);
        assert!(sentiments.iter().all(|s| s.stars == StarRating::Three));
    }

    #[test]
    fn batch_size_floor_is_one() {
        let scorer = SentimentScorer::new("http://localhost").with_batch_size(0);
        assert_eq!(scorer.batch_size, 1);
    }
}
