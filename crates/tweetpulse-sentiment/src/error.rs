use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    /// The inference server could not be reached, answered with a bad
    /// status, or broke the one-prediction-per-input contract.
    #[error("inference error: {0}")]
    Inference(String),

    /// The model produced a label outside the `"<n> stars"` grammar. This is
    /// an internal-consistency failure and is never coerced to a default.
    #[error("model label outside expected grammar: {label:?}")]
    ModelParse { label: String },
}
