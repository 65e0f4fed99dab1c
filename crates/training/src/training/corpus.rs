//! Word frequency table with per-word symbol segmentations.
//!
//! The table is the mutable state of training: every entry holds one
//! training word's current segmentation and its corpus count. Merges
//! reshape the segmentations; the counts and their sum never change.

use ahash::AHashMap;
use compact_str::CompactString;
use subtok_core::{validate_marked_word, Result, SymbolPair};
use unicode_segmentation::UnicodeSegmentation;

/// One training word: its current segmentation and corpus count.
///
/// Concatenating `symbols` always reproduces the original word, so two
/// distinct words can never collide on their segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// Current symbol segmentation of the word
    pub symbols: Vec<CompactString>,
    /// Corpus frequency
    pub count: u64,
}

/// Frequency table mapping each training word's segmentation to its
/// count. Entries keep their construction order.
#[derive(Debug, Clone, Default)]
pub struct WordTable {
    entries: Vec<WordEntry>,
}

impl WordTable {
    /// Build the initial table from marker-suffixed words and their
    /// counts.
    ///
    /// Each word is split into its grapheme clusters, one symbol per
    /// cluster, with the end-of-word marker as the final symbol.
    /// Characters outside the training alphabet still become their own
    /// symbols; the vocabulary is derived from the alphabet, not
    /// consulted here. Words violating the marker discipline are
    /// rejected.
    pub fn from_word_counts<I, S>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();

        for (word, count) in counts {
            let word = word.as_ref();
            validate_marked_word(word)?;

            let symbols = word.graphemes(true).map(CompactString::new).collect();
            entries.push(WordEntry { symbols, count });
        }

        Ok(Self { entries })
    }

    /// Fuse every occurrence of `pair` into one symbol, producing the
    /// next table. The scan is left to right over the symbol list, so
    /// overlapping occurrences (like `a a a` for the pair `(a, a)`)
    /// consume greedily from the left. Counts carry over unchanged.
    pub fn apply_merge(&self, pair: &SymbolPair) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|entry| WordEntry {
                symbols: merge_symbols(&entry.symbols, pair),
                count: entry.count,
            })
            .collect();

        Self { entries }
    }

    /// Sum of all word counts; invariant under merges.
    pub fn total_frequency(&self) -> u64 {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// Number of distinct words.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over word entries.
    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.iter()
    }

    /// Get the entries as a slice.
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Display form: each word's space-joined segmentation with its
    /// count.
    pub fn segmentations(&self) -> Vec<(String, u64)> {
        self.entries
            .iter()
            .map(|entry| (entry.symbols.join(" "), entry.count))
            .collect()
    }
}

/// Replace adjacent `(pair.0, pair.1)` occurrences with the fused
/// symbol, index-walking the tokenized list rather than rewriting the
/// word as a string.
fn merge_symbols(symbols: &[CompactString], pair: &SymbolPair) -> Vec<CompactString> {
    let mut out = Vec::with_capacity(symbols.len());
    let mut i = 0;

    while i < symbols.len() {
        if i + 1 < symbols.len() && symbols[i] == pair.0 && symbols[i + 1] == pair.1 {
            let mut merged = symbols[i].clone();
            merged.push_str(&symbols[i + 1]);
            out.push(merged);
            i += 2;
        } else {
            out.push(symbols[i].clone());
            i += 1;
        }
    }

    out
}

/// Convenience constructor from a word -> count map.
pub fn table_from_map(counts: &AHashMap<String, u64>) -> Result<WordTable> {
    WordTable::from_word_counts(counts.iter().map(|(word, &count)| (word.as_str(), count)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(left: &str, right: &str) -> SymbolPair {
        (left.into(), right.into())
    }

    #[test]
    fn test_from_word_counts_splits_graphemes() {
        let table = WordTable::from_word_counts([("fast_", 4u64)]).unwrap();

        assert_eq!(table.len(), 1);
        let entry = &table.entries()[0];
        assert_eq!(entry.symbols, vec!["f", "a", "s", "t", "_"]);
        assert_eq!(entry.count, 4);
    }

    #[test]
    fn test_from_word_counts_rejects_malformed() {
        assert!(WordTable::from_word_counts([("fast", 4u64)]).is_err());
        assert!(WordTable::from_word_counts([("fa_st_", 4u64)]).is_err());
    }

    #[test]
    fn test_apply_merge_fuses_everywhere() {
        let table =
            WordTable::from_word_counts([("tata_", 2u64), ("at_", 3u64)]).unwrap();
        let merged = table.apply_merge(&pair("t", "a"));

        assert_eq!(merged.entries()[0].symbols, vec!["ta", "ta", "_"]);
        assert_eq!(merged.entries()[1].symbols, vec!["a", "t", "_"]);

        // The input table is untouched.
        assert_eq!(table.entries()[0].symbols, vec!["t", "a", "t", "a", "_"]);
    }

    #[test]
    fn test_apply_merge_overlapping_pairs() {
        let table = WordTable::from_word_counts([("aaa_", 1u64)]).unwrap();
        let merged = table.apply_merge(&pair("a", "a"));

        assert_eq!(merged.entries()[0].symbols, vec!["aa", "a", "_"]);
    }

    #[test]
    fn test_apply_merge_at_word_end() {
        let table = WordTable::from_word_counts([("ta_", 1u64)]).unwrap();
        let merged = table.apply_merge(&pair("a", "_"));

        assert_eq!(merged.entries()[0].symbols, vec!["t", "a_"]);
    }

    #[test]
    fn test_frequency_conserved_across_merges() {
        let table =
            WordTable::from_word_counts([("tall_", 5u64), ("fast_", 4u64)]).unwrap();
        let before = table.total_frequency();

        let merged = table
            .apply_merge(&pair("t", "a"))
            .apply_merge(&pair("a", "l"))
            .apply_merge(&pair("s", "t"));

        assert_eq!(before, 9);
        assert_eq!(merged.total_frequency(), before);
    }

    #[test]
    fn test_segmentations_concatenate_to_words() {
        let table =
            WordTable::from_word_counts([("tall_", 5u64), ("fast_", 4u64)]).unwrap();
        let merged = table.apply_merge(&pair("t", "a"));

        for (segmentation, _) in merged.segmentations() {
            let word: String = segmentation.split(' ').collect();
            assert!(word == "tall_" || word == "fast_");
        }
    }
}
