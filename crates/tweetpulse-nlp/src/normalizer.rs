//! Social-media text cleaning pipeline.

use once_cell::sync::Lazy;
use regex::Regex;
use tweetpulse_core::PostRecord;
use unicode_segmentation::UnicodeSegmentation;

use crate::lemmatizer::Lemmatizer;
use crate::stopwords::stop_words;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:https?://|www\.)\S+").expect("valid regex"));
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("valid regex"));
static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").expect("valid regex"));
static RT_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*rt\s+").expect("valid regex"));

/// Knobs for [`TextNormalizer`]; both are surfaced through configuration.
#[derive(Debug, Clone)]
pub struct NormalizerOptions {
    /// Lemmas shorter than this (in chars) are dropped.
    pub min_token_len: usize,
    /// Keep the word behind a `#` marker, or drop the whole hashtag.
    pub keep_hashtag_words: bool,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            min_token_len: 3,
            keep_hashtag_words: true,
        }
    }
}

/// Pure, deterministic text cleaner.
///
/// [`TextNormalizer::clean`] never fails and is idempotent:
/// `clean(clean(s)) == clean(s)`. The instance is immutable after
/// construction and safe to share across concurrent pipeline runs.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    lemmatizer: Lemmatizer,
    min_token_len: usize,
    keep_hashtag_words: bool,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizerOptions::default())
    }
}

impl TextNormalizer {
    #[must_use]
    pub fn new(options: NormalizerOptions) -> Self {
        Self {
            lemmatizer: Lemmatizer::new(),
            min_token_len: options.min_token_len,
            keep_hashtag_words: options.keep_hashtag_words,
        }
    }

    /// Cleans one raw post text down to space-joined content lemmas.
    ///
    /// Steps, in order: lowercase; strip links, mentions, hashtags (marker
    /// or whole tag, per configuration) and a leading retweet marker; fold
    /// digits/punctuation to whitespace; tokenize; lemmatize; drop stop
    /// words (checked against both the surface form and the lemma, so the
    /// output is stable under re-cleaning) and short lemmas.
    #[must_use]
    pub fn clean(&self, text: &str) -> String {
        let mut text = text.to_lowercase();
        text = URL_RE.replace_all(&text, " ").into_owned();
        text = MENTION_RE.replace_all(&text, " ").into_owned();
        if !self.keep_hashtag_words {
            text = HASHTAG_RE.replace_all(&text, " ").into_owned();
        }
        text = RT_PREFIX_RE.replace(&text, "").into_owned();

        // Punctuation, digits and symbols become spaces, never nothing:
        // "state-of-the-art" must not fuse into one token.
        let text: String = text
            .chars()
            .map(|c| {
                if c.is_alphabetic() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        let stop = stop_words();
        let mut lemmas: Vec<String> = Vec::new();
        for token in text.unicode_words() {
            if !token.chars().all(char::is_alphabetic) {
                continue;
            }
            if stop.contains(token) {
                continue;
            }
            let lemma = self.lemmatizer.lemma(token);
            if stop.contains(lemma.as_str()) {
                continue;
            }
            if lemma.chars().count() < self.min_token_len {
                continue;
            }
            lemmas.push(lemma);
        }
        lemmas.join(" ")
    }

    /// Attaches `cleaned_text` to every record. An empty slice is a no-op.
    pub fn preprocess_dataset(&self, records: &mut [PostRecord]) {
        for record in records.iter_mut() {
            record.cleaned_text = Some(self.clean(&record.text));
        }
    }
}
