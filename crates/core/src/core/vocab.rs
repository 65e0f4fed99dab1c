//! Symbol vocabulary storage and lookup.
//!
//! This module provides the growing symbol set learned during training,
//! using AHashMap for fast lookups and CompactString for memory-efficient
//! symbol storage. Symbols keep their insertion order and are never
//! removed or mutated.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// End-of-word marker, the final symbol of every word token.
///
/// Keeping it as an ordinary vocabulary symbol lets merges learn
/// suffix units like `er_` without ever crossing a word boundary.
pub const END_OF_WORD: &str = "_";

/// Placeholder emitted when no vocabulary symbol matches a remainder
/// during segmentation.
pub const UNKNOWN: &str = "[UNK]";

/// Growing set of subword symbols with stable insertion order.
///
/// Inserting an existing symbol is a no-op that returns the original ID,
/// so the set only grows and IDs stay stable for the lifetime of a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolVocab {
    /// Symbols in insertion order; never shrinks
    symbols: Vec<CompactString>,
    /// Reverse index: symbol -> position in `symbols`
    index: AHashMap<CompactString, u32>,
}

impl SymbolVocab {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    /// The classic starting alphabet: `a` through `z` plus the two
    /// reserved markers.
    pub fn ascii_lowercase() -> Self {
        let mut vocab = Self::with_capacity(28);
        for c in 'a'..='z' {
            vocab.insert(&c.to_string());
        }
        vocab.insert(END_OF_WORD);
        vocab.insert(UNKNOWN);
        vocab
    }

    /// Build a vocabulary from an arbitrary set of atomic symbols.
    ///
    /// The reserved markers are appended if the alphabet does not
    /// already contain them.
    pub fn from_alphabet<I, S>(alphabet: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::new();
        for symbol in alphabet {
            vocab.insert(symbol.as_ref());
        }
        vocab.insert(END_OF_WORD);
        vocab.insert(UNKNOWN);
        vocab
    }

    /// Derive the atomic alphabet from the corpus itself: every
    /// grapheme cluster of every word becomes a symbol, in first-seen
    /// order, followed by the reserved markers.
    pub fn from_corpus_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::new();
        for word in words {
            for grapheme in word.as_ref().graphemes(true) {
                vocab.insert(grapheme);
            }
        }
        vocab.insert(END_OF_WORD);
        vocab.insert(UNKNOWN);
        vocab
    }

    /// Add a symbol to the vocabulary.
    ///
    /// Returns the ID assigned to the symbol, or the existing ID if the
    /// symbol is already present.
    pub fn insert(&mut self, symbol: &str) -> u32 {
        if let Some(&id) = self.index.get(symbol) {
            return id;
        }

        let id = self.symbols.len() as u32;
        let symbol = CompactString::new(symbol);
        self.symbols.push(symbol.clone());
        self.index.insert(symbol, id);

        id
    }

    /// Get the ID for a symbol string.
    #[inline]
    pub fn id_of(&self, symbol: &str) -> Option<u32> {
        self.index.get(symbol).copied()
    }

    /// Get the symbol string for an ID.
    #[inline]
    pub fn symbol(&self, id: u32) -> Option<&str> {
        self.symbols.get(id as usize).map(|s| s.as_str())
    }

    /// Check whether a symbol is in the vocabulary.
    #[inline]
    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over symbols in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(|s| s.as_str())
    }
}

impl Default for SymbolVocab {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that a word is well formed for training or segmentation:
/// it must end with the end-of-word marker, carry no interior marker,
/// and never contain the unknown marker.
pub fn validate_marked_word(word: &str) -> Result<()> {
    if !word.ends_with(END_OF_WORD) {
        return Err(TokenizerError::MalformedWord {
            word: word.to_string(),
            reason: format!("missing trailing '{}' marker", END_OF_WORD),
        });
    }

    let stem = &word[..word.len() - END_OF_WORD.len()];
    if stem.contains(END_OF_WORD) {
        return Err(TokenizerError::MalformedWord {
            word: word.to_string(),
            reason: format!("'{}' may only appear as the final symbol", END_OF_WORD),
        });
    }

    if word.contains(UNKNOWN) {
        return Err(TokenizerError::MalformedWord {
            word: word.to_string(),
            reason: format!("'{}' is reserved", UNKNOWN),
        });
    }

    Ok(())
}

/// Append the end-of-word marker to a raw word.
///
/// The raw word must not already contain either reserved marker.
pub fn mark_word(raw: &str) -> Result<String> {
    if raw.contains(END_OF_WORD) {
        return Err(TokenizerError::MalformedWord {
            word: raw.to_string(),
            reason: format!("raw words may not contain '{}'", END_OF_WORD),
        });
    }

    if raw.contains(UNKNOWN) {
        return Err(TokenizerError::MalformedWord {
            word: raw.to_string(),
            reason: format!("'{}' is reserved", UNKNOWN),
        });
    }

    Ok(format!("{}{}", raw, END_OF_WORD))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert() {
        let mut vocab = SymbolVocab::new();
        let id1 = vocab.insert("ta");
        let id2 = vocab.insert("tal");

        assert_eq!(id1, 0);
        assert_eq!(id2, 1);
        assert_eq!(vocab.id_of("ta"), Some(0));
        assert_eq!(vocab.id_of("tal"), Some(1));
        assert_eq!(vocab.symbol(0), Some("ta"));
        assert_eq!(vocab.symbol(1), Some("tal"));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut vocab = SymbolVocab::new();
        let id1 = vocab.insert("ta");
        let id2 = vocab.insert("ta");

        assert_eq!(id1, id2);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut vocab = SymbolVocab::new();
        vocab.insert("b");
        vocab.insert("a");
        vocab.insert("c");

        let symbols: Vec<&str> = vocab.iter().collect();
        assert_eq!(symbols, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_ascii_lowercase() {
        let vocab = SymbolVocab::ascii_lowercase();

        assert_eq!(vocab.len(), 28);
        assert!(vocab.contains("a"));
        assert!(vocab.contains("z"));
        assert!(vocab.contains(END_OF_WORD));
        assert!(vocab.contains(UNKNOWN));
        assert!(!vocab.contains("A"));
    }

    #[test]
    fn test_from_alphabet_adds_markers() {
        let vocab = SymbolVocab::from_alphabet(["x", "y"]);

        assert_eq!(vocab.len(), 4);
        assert!(vocab.contains(END_OF_WORD));
        assert!(vocab.contains(UNKNOWN));
    }

    #[test]
    fn test_from_corpus_words() {
        let vocab = SymbolVocab::from_corpus_words(["fast_", "tall_"]);

        // f, a, s, t, _, l plus [UNK]
        assert_eq!(vocab.len(), 7);
        let symbols: Vec<&str> = vocab.iter().collect();
        assert_eq!(symbols, vec!["f", "a", "s", "t", "_", "l", UNKNOWN]);
    }

    #[test]
    fn test_validate_marked_word() {
        assert!(validate_marked_word("fast_").is_ok());
        assert!(validate_marked_word("_").is_ok());

        assert!(validate_marked_word("fast").is_err());
        assert!(validate_marked_word("fa_st_").is_err());
        assert!(validate_marked_word("fast[UNK]_").is_err());
        assert!(validate_marked_word("").is_err());
    }

    #[test]
    fn test_mark_word() {
        assert_eq!(mark_word("fast").unwrap(), "fast_");
        assert_eq!(mark_word("").unwrap(), "_");

        assert!(mark_word("fast_").is_err());
        assert!(mark_word("[UNK]").is_err());
    }
}
