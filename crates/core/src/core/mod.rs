//! Core data structures for subword vocabulary learning.
//!
//! This module contains the symbol vocabulary and merge history that
//! training produces and segmentation consumes.

pub mod merges;
pub mod vocab;

pub use merges::{MergeHistory, MergeRecord, SymbolPair};
pub use vocab::{mark_word, validate_marked_word, SymbolVocab, END_OF_WORD, UNKNOWN};
