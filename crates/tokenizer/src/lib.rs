//! Subtok-tokenizer - High-level subword tokenizer API
//!
//! This crate ties the core vocabulary and the trainer into a single
//! `Tokenizer` facade: feed it raw text or word counts, train a merge
//! vocabulary, segment new words, and persist the model.
//!
//! # Features
//!
//! - Builder pattern for tokenizer configuration
//! - Pre-tokenization pipeline (Unicode normalization, splitting, word
//!   counting)
//! - Batch segmentation parallelized with rayon
//! - Saving and loading as a versioned JSON document or as plain-text
//!   `vocab.txt` + `merges.txt`
//! - LRU cache for repeated word segmentations
//!
//! # Example
//!
//! ```rust
//! use subtok_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().num_merges(10).build()?;
//!
//! let summary = tokenizer.train_from_text("tall tall tall fast fast")?;
//! assert!(summary.merges_applied > 0);
//!
//! let pieces = tokenizer.segment("tallest")?;
//! println!("{}", pieces);
//! # Ok::<(), subtok_tokenizer::TokenizerError>(())
//! ```

pub use subtok_core::{Result, TokenizerError, END_OF_WORD, UNKNOWN};

// Tokenizer facade
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig, TrainSummary};

// IO/Serialization
pub mod io;
pub use io::{ModelFormat, ModelLoader, ModelSaver};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{count_words, NormalizationForm, Normalizer, SplitPattern, Splitter};

// Utilities
pub mod utils;
pub use utils::SegmentationCache;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
