//! Text normalization for the sentiment pipeline.
//!
//! Pure text-to-text cleaning: social-media noise removal (links, mentions,
//! hashtag markers, retweet prefixes), punctuation/digit stripping, and
//! rule-based French/English lemmatization with bilingual stop-word
//! filtering. No I/O anywhere in this crate.

pub mod lemmatizer;
pub mod normalizer;
pub mod stopwords;

pub use lemmatizer::Lemmatizer;
pub use normalizer::{NormalizerOptions, TextNormalizer};
pub use stopwords::stop_words;
