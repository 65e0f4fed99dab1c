//! Greedy longest-match word segmentation.
//!
//! Segments each word into the longest vocabulary symbols available,
//! scanning left to right. Anything the vocabulary cannot cover becomes
//! a single unknown marker, so segmentation is total over arbitrary
//! input words.

use crate::core::vocab::{validate_marked_word, SymbolVocab, UNKNOWN};
use crate::error::Result;
use compact_str::CompactString;
use unicode_segmentation::UnicodeSegmentation;

/// Greedy longest-match segmenter over a frozen vocabulary.
///
/// The vocabulary is borrowed read-only; one segmenter can serve any
/// number of words, including concurrently.
pub struct GreedySegmenter<'a> {
    vocab: &'a SymbolVocab,
}

impl<'a> GreedySegmenter<'a> {
    /// Create a segmenter over a trained vocabulary.
    pub fn new(vocab: &'a SymbolVocab) -> Self {
        Self { vocab }
    }

    /// Segment a single marker-suffixed word into known symbols.
    ///
    /// A `start` cursor walks the word; for each position the longest
    /// candidate `word[start..end]` that is in the vocabulary is
    /// emitted, shrinking `end` one grapheme at a time until a match is
    /// found. When not even a single grapheme matches, the entire
    /// unmatched remainder becomes one `[UNK]` and scanning stops.
    ///
    /// Candidates only split at grapheme cluster boundaries, so
    /// combining sequences are never torn apart. Worst case is
    /// quadratic in the word length.
    pub fn segment_word(&self, word: &str) -> Result<Vec<CompactString>> {
        validate_marked_word(word)?;

        // Byte offsets of grapheme boundaries; candidate substrings
        // slice the original word without copying.
        let mut bounds: Vec<usize> = word.grapheme_indices(true).map(|(i, _)| i).collect();
        bounds.push(word.len());
        let n = bounds.len() - 1;

        let mut pieces = Vec::new();
        let mut start = 0;
        let mut end = n;

        while start < n && start < end {
            let candidate = &word[bounds[start]..bounds[end]];
            if self.vocab.contains(candidate) {
                pieces.push(CompactString::new(candidate));
                start = end;
                end = n;
            } else {
                end -= 1;
            }
        }

        if start < n {
            pieces.push(CompactString::new(UNKNOWN));
        }

        Ok(pieces)
    }

    /// Segment many words, producing one space-joined symbol string per
    /// word.
    pub fn segment_words(&self, words: &[String]) -> Result<Vec<String>> {
        words
            .iter()
            .map(|word| self.segment_word(word).map(|pieces| pieces.join(" ")))
            .collect()
    }
}
