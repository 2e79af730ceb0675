//! Sentiment scoring and pipeline orchestration for tweetpulse.
//!
//! Wraps a multilingual star-rating inference server behind
//! [`SentimentScorer`], owns the process-wide analysis resources, and
//! composes fetch → normalize → score → persist into [`run_pipeline`]. The
//! interactive one-text path is [`score_text`].

pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod resources;
pub mod scorer;

pub use dataset::{write_dataset, DatasetError};
pub use error::SentimentError;
pub use pipeline::{
    run_pipeline, score_text, PipelineError, PipelineOutput, PipelineRequest, RunStatus,
    ScoredText,
};
pub use resources::AnalysisResources;
pub use scorer::SentimentScorer;
