//! Subtok-core - Core subword vocabulary primitives
//!
//! This crate provides the fundamental data structures for learning and
//! applying subword vocabularies: the growing symbol set, the ordered
//! merge history, and greedy longest-match segmentation.
//!
//! # Features
//!
//! - Insertion-ordered vocabulary storage using `AHashMap` and compact strings
//! - Reserved end-of-word and unknown markers with validation helpers
//! - Total, deterministic longest-match segmentation with `[UNK]` fallback
//! - Error handling with detailed diagnostics
//!
//! # Example
//!
//! ```rust
//! use subtok_core::{GreedySegmenter, SymbolVocab};
//!
//! let mut vocab = SymbolVocab::ascii_lowercase();
//! vocab.insert("ta");
//!
//! let segmenter = GreedySegmenter::new(&vocab);
//! let pieces = segmenter.segment_word("tab_")?;
//! assert_eq!(pieces, vec!["ta", "b", "_"]);
//! # Ok::<(), subtok_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Vocabulary and merge history
pub mod core;
pub use core::{
    mark_word, validate_marked_word, MergeHistory, MergeRecord, SymbolPair, SymbolVocab,
    END_OF_WORD, UNKNOWN,
};

// Segmentation over a frozen vocabulary
pub mod segment;
pub use segment::GreedySegmenter;
