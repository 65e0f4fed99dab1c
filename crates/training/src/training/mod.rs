//! Subword merge training.
//!
//! This module holds the mutable side of the system: the word frequency
//! table, the per-iteration pair statistics, and the trainer that ties
//! them together.

pub mod corpus;
pub mod pairs;
pub mod trainer;

pub use corpus::{table_from_map, WordEntry, WordTable};
pub use pairs::{most_frequent_pair, PairStats};
pub use trainer::{BpeTrainer, TrainOutcome, TrainerConfig};
