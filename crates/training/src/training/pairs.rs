//! Adjacent symbol pair statistics.
//!
//! Pair counts are rebuilt from scratch for every merge iteration by a
//! full scan of the word table; there is no incremental state to keep
//! consistent. Cost is linear in the total segmentation length.

use super::corpus::WordTable;
use ahash::AHashMap;
use subtok_core::{Result, SymbolPair, TokenizerError};

/// Frequencies of adjacent symbol pairs across a word table.
#[derive(Debug, Clone, Default)]
pub struct PairStats {
    /// Pair -> summed frequency of the words containing it
    counts: AHashMap<SymbolPair, u64>,
}

impl PairStats {
    /// Count every adjacent pair in the table, weighted by word
    /// frequency. Pairs never straddle a word boundary because the
    /// scan runs per word.
    pub fn from_table(table: &WordTable) -> Self {
        let mut counts: AHashMap<SymbolPair, u64> = AHashMap::new();

        for entry in table.iter() {
            for window in entry.symbols.windows(2) {
                let pair = (window[0].clone(), window[1].clone());
                *counts.entry(pair).or_insert(0) += entry.count;
            }
        }

        Self { counts }
    }

    /// Parallel variant: per-word maps are folded into one.
    ///
    /// Count addition is associative and commutative, so the final
    /// counts (and therefore the chosen merge) match the sequential
    /// path exactly.
    pub fn from_table_parallel(table: &WordTable) -> Self {
        use rayon::prelude::*;

        let counts = table
            .entries()
            .par_iter()
            .map(|entry| {
                let mut local: AHashMap<SymbolPair, u64> = AHashMap::new();

                for window in entry.symbols.windows(2) {
                    let pair = (window[0].clone(), window[1].clone());
                    *local.entry(pair).or_insert(0) += entry.count;
                }

                local
            })
            .reduce(AHashMap::new, |mut acc, local| {
                for (pair, count) in local {
                    *acc.entry(pair).or_insert(0) += count;
                }
                acc
            });

        Self { counts }
    }

    /// Get the count for a pair.
    #[inline]
    pub fn get(&self, pair: &SymbolPair) -> u64 {
        self.counts.get(pair).copied().unwrap_or(0)
    }

    /// Number of distinct pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no pairs were observed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The pair to merge next: the maximum of `(count, pair)`.
    ///
    /// Equal counts resolve to the lexicographically greatest pair, so
    /// the winner never depends on hash iteration order or platform.
    pub fn best(&self) -> Option<(&SymbolPair, u64)> {
        self.counts
            .iter()
            .max_by(|(pair_a, count_a), (pair_b, count_b)| {
                count_a.cmp(count_b).then_with(|| pair_a.cmp(pair_b))
            })
            .map(|(pair, &count)| (pair, count))
    }
}

/// Select the pair to merge next, or fail when the table is degenerate.
///
/// A table where every word is already a single symbol (or which has no
/// words at all) offers nothing to merge; that condition is an explicit
/// typed error rather than a lookup failure deep in the merge step.
pub fn most_frequent_pair(table: &WordTable) -> Result<(SymbolPair, u64)> {
    PairStats::from_table(table)
        .best()
        .map(|(pair, count)| (pair.clone(), count))
        .ok_or_else(|| {
            TokenizerError::NoMergeablePairs(
                "every word is a single symbol or the table is empty".to_string(),
            )
        })
}
