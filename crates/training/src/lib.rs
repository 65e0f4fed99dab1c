//! Subtok-training - learning subword merges from word frequencies
//!
//! This crate implements the training side of the tokenizer: building
//! the word frequency table, counting adjacent symbol pairs, and the
//! iterative merge loop that grows the vocabulary one symbol at a time.
//!
//! # Features
//!
//! - Immutable-update word table; a single merge step is testable in
//!   isolation
//! - Pair statistics rebuilt from scratch per iteration, with an
//!   optional rayon-parallel counting path
//! - Deterministic merge selection (count first, then lexicographic
//!   pair order) and an ordered, replayable merge history
//! - Typed errors for degenerate corpora; early stop with reporting
//!   when merges run out
//!
//! # Example
//!
//! ```rust
//! use subtok_core::SymbolVocab;
//! use subtok_training::{BpeTrainer, TrainerConfig};
//!
//! let counts = vec![("fast_", 4u64), ("tall_", 5u64)];
//! let vocab = SymbolVocab::from_corpus_words(counts.iter().map(|(w, _)| *w));
//!
//! let trainer = BpeTrainer::new(TrainerConfig {
//!     num_merges: 3,
//!     parallel: false,
//! });
//! let outcome = trainer.train(counts, vocab)?;
//! assert_eq!(outcome.merges_applied(), 3);
//! # Ok::<(), subtok_core::TokenizerError>(())
//! ```

pub use subtok_core::{Result, TokenizerError};

pub mod training;
pub use training::{
    most_frequent_pair, BpeTrainer, PairStats, TrainOutcome, TrainerConfig, WordEntry, WordTable,
};
