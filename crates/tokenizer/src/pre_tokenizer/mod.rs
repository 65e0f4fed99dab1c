//! Pre-tokenization: turning raw text into countable words.
//!
//! The pipeline runs Unicode normalization, then splitting, then word
//! counting; the counts feed the trainer.

pub mod normalize;
pub mod split;

pub use normalize::{NormalizationForm, Normalizer};
pub use split::{SplitPattern, Splitter};

use ahash::AHashMap;

/// Count word occurrences in a text after normalization and splitting.
///
/// The returned words are raw (no end-of-word marker); the tokenizer
/// facade appends the marker when it builds the word table.
pub fn count_words(text: &str, normalizer: &Normalizer, splitter: &Splitter) -> AHashMap<String, u64> {
    let normalized = normalizer.normalize(text);

    let mut counts = AHashMap::new();
    for word in splitter.split(&normalized) {
        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}
