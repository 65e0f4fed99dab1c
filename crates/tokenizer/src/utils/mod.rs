//! Shared utilities for the tokenizer.

pub mod cache;

pub use cache::{CacheStats, SegmentationCache};
