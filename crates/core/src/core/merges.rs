//! Merge history for learned subword vocabularies.
//!
//! Training chooses one pair per iteration; the history records those
//! choices in order so a vocabulary can be inspected, exported, and
//! rebuilt deterministically.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// An ordered pair of adjacent symbols.
pub type SymbolPair = (CompactString, CompactString);

/// A single merge chosen during training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRecord {
    /// Left symbol of the merged pair
    pub left: CompactString,
    /// Right symbol of the merged pair
    pub right: CompactString,
    /// Concatenated symbol added to the vocabulary
    pub merged: CompactString,
    /// Pair frequency observed when the merge was chosen
    pub count: u64,
}

impl MergeRecord {
    /// The pair this record merged.
    pub fn pair(&self) -> SymbolPair {
        (self.left.clone(), self.right.clone())
    }
}

/// Merges in the order they were chosen; the position of a record is
/// its rank (0 = first learned).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeHistory {
    records: Vec<MergeRecord>,
}

impl MergeHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Create a new history with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append the next merge.
    pub fn push(&mut self, record: MergeRecord) {
        self.records.push(record);
    }

    /// Get the record at a given rank.
    #[inline]
    pub fn get(&self, rank: usize) -> Option<&MergeRecord> {
        self.records.get(rank)
    }

    /// The most recent merge.
    pub fn last(&self) -> Option<&MergeRecord> {
        self.records.last()
    }

    /// Number of merges recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no merges have been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &MergeRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(left: &str, right: &str, count: u64) -> MergeRecord {
        MergeRecord {
            left: left.into(),
            right: right.into(),
            merged: format!("{}{}", left, right).into(),
            count,
        }
    }

    #[test]
    fn test_push_and_rank_order() {
        let mut history = MergeHistory::new();
        history.push(record("t", "a", 9));
        history.push(record("ta", "l", 9));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().merged, "ta");
        assert_eq!(history.get(1).unwrap().merged, "tal");
        assert_eq!(history.get(2), None);
    }

    #[test]
    fn test_iter_in_order() {
        let mut history = MergeHistory::new();
        history.push(record("e", "r", 7));
        history.push(record("er", "_", 7));

        let merged: Vec<&str> = history.iter().map(|r| r.merged.as_str()).collect();
        assert_eq!(merged, vec!["er", "er_"]);
        assert_eq!(history.last().unwrap().merged, "er_");
    }

    #[test]
    fn test_record_pair() {
        let rec = record("t", "a", 9);
        let (left, right) = rec.pair();
        assert_eq!(left, "t");
        assert_eq!(right, "a");
    }
}
