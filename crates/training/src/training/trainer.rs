//! Iterative merge training.
//!
//! The trainer drives the learn loop: rebuild pair statistics, pick the
//! most frequent pair, grow the vocabulary by its concatenation, fuse
//! the pair throughout the word table, and record the choice. One merge
//! per iteration, for the configured number of iterations or until no
//! pair is left to merge.

use super::corpus::WordTable;
use super::pairs::PairStats;
use subtok_core::{MergeHistory, MergeRecord, Result, SymbolVocab, TokenizerError};

/// How often the training loop reports progress.
const LOG_INTERVAL: usize = 100;

/// Configuration for merge training.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Number of merge iterations; each adds exactly one symbol
    pub num_merges: usize,
    /// Count pairs with rayon; the chosen merges are identical either way
    pub parallel: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            num_merges: 1_000,
            parallel: true,
        }
    }
}

/// Everything training produces.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    /// Frozen vocabulary: the initial alphabet plus one symbol per merge
    pub vocab: SymbolVocab,
    /// Final word table, showing the learned segmentation of every
    /// training word
    pub table: WordTable,
    /// Merges in the order they were chosen
    pub history: MergeHistory,
    /// Number of merges the caller asked for
    pub merges_requested: usize,
}

impl TrainOutcome {
    /// Number of merges actually applied.
    pub fn merges_applied(&self) -> usize {
        self.history.len()
    }

    /// Whether training ran out of mergeable pairs before reaching the
    /// requested merge count.
    pub fn exhausted(&self) -> bool {
        self.merges_applied() < self.merges_requested
    }
}

/// Learns subword merges from word frequencies.
pub struct BpeTrainer {
    config: TrainerConfig,
}

impl BpeTrainer {
    /// Create a trainer with the given configuration.
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Create a trainer that performs `num_merges` merges.
    pub fn with_num_merges(num_merges: usize) -> Self {
        Self::new(TrainerConfig {
            num_merges,
            ..Default::default()
        })
    }

    /// Train on marker-suffixed words and their corpus counts.
    ///
    /// The vocabulary seeds the symbol set and grows by one symbol per
    /// merge. A corpus with nothing to merge at all (empty, or every
    /// word already a single symbol) is an error; running out of pairs
    /// partway through is an early stop, visible through
    /// [`TrainOutcome::exhausted`].
    pub fn train<I, S>(&self, word_counts: I, vocab: SymbolVocab) -> Result<TrainOutcome>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let table = WordTable::from_word_counts(word_counts)?;
        self.train_table(table, vocab)
    }

    /// Train on an already-built word table.
    pub fn train_table(&self, table: WordTable, mut vocab: SymbolVocab) -> Result<TrainOutcome> {
        if self.config.num_merges == 0 {
            return Err(TokenizerError::InvalidConfig(
                "num_merges must be at least 1".to_string(),
            ));
        }

        let requested = self.config.num_merges;
        let mut table = table;
        let mut history = MergeHistory::with_capacity(requested);

        log::info!(
            "training: {} words, total frequency {}, {} merges requested",
            table.len(),
            table.total_frequency(),
            requested
        );

        for rank in 0..requested {
            let stats = if self.config.parallel {
                PairStats::from_table_parallel(&table)
            } else {
                PairStats::from_table(&table)
            };

            let (pair, count) = match stats.best() {
                Some((pair, count)) => (pair.clone(), count),
                None if rank == 0 => {
                    return Err(TokenizerError::NoMergeablePairs(
                        "corpus has no word with two or more symbols".to_string(),
                    ));
                }
                None => {
                    log::warn!(
                        "mergeable pairs exhausted after {} of {} merges",
                        rank,
                        requested
                    );
                    break;
                }
            };

            let mut merged = pair.0.clone();
            merged.push_str(&pair.1);
            vocab.insert(&merged);

            history.push(MergeRecord {
                left: pair.0.clone(),
                right: pair.1.clone(),
                merged,
                count,
            });

            table = table.apply_merge(&pair);

            if (rank + 1) % LOG_INTERVAL == 0 {
                log::info!(
                    "merge {}/{}: vocab size {}",
                    rank + 1,
                    requested,
                    vocab.len()
                );
            }
        }

        log::info!(
            "training done: {} merges applied, vocab size {}",
            history.len(),
            vocab.len()
        );

        Ok(TrainOutcome {
            vocab,
            table,
            history,
            merges_requested: requested,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_counts() -> Vec<(&'static str, u64)> {
        vec![("fast_", 4), ("faster_", 3), ("tall_", 5), ("taller_", 4)]
    }

    fn sample_vocab() -> SymbolVocab {
        SymbolVocab::from_corpus_words(sample_counts().iter().map(|(word, _)| *word))
    }

    fn train(num_merges: usize) -> TrainOutcome {
        let trainer = BpeTrainer::new(TrainerConfig {
            num_merges,
            parallel: false,
        });
        trainer.train(sample_counts(), sample_vocab()).unwrap()
    }

    #[test]
    fn test_ta_merged_before_tal() {
        let outcome = train(10);

        let merges: Vec<&str> = outcome.history.iter().map(|r| r.merged.as_str()).collect();
        let ta = merges.iter().position(|&m| m == "ta").unwrap();
        let tal = merges.iter().position(|&m| m == "tal").unwrap();
        assert!(ta < tal);

        // Both pairs dominate their iteration outright (count 9).
        assert_eq!(outcome.history.get(ta).unwrap().count, 9);
        assert_eq!(outcome.history.get(tal).unwrap().count, 9);
    }

    #[test]
    fn test_merge_sequence_is_reproducible() {
        let first = train(10);
        let second = train(10);

        let merges_a: Vec<_> = first.history.iter().map(|r| r.merged.clone()).collect();
        let merges_b: Vec<_> = second.history.iter().map(|r| r.merged.clone()).collect();
        assert_eq!(merges_a, merges_b);
        assert_eq!(
            merges_a,
            vec!["ta", "tal", "tall", "st", "r_", "fa", "fast", "er_", "tall_", "taller_"]
        );
    }

    #[test]
    fn test_vocab_grows_by_one_per_merge() {
        let initial = sample_vocab().len();
        let outcome = train(10);

        assert_eq!(outcome.merges_applied(), 10);
        assert_eq!(outcome.vocab.len(), initial + 10);
        assert!(!outcome.exhausted());
    }

    #[test]
    fn test_frequency_conserved() {
        let outcome = train(10);
        assert_eq!(outcome.table.total_frequency(), 16);
    }

    #[test]
    fn test_final_segmentations_round_trip() {
        let outcome = train(10);

        let mut words: Vec<String> = outcome
            .table
            .segmentations()
            .into_iter()
            .map(|(segmentation, _)| segmentation.split(' ').collect())
            .collect();
        words.sort();
        assert_eq!(words, vec!["fast_", "faster_", "tall_", "taller_"]);
    }

    #[test]
    fn test_early_stop_on_exhaustion() {
        let trainer = BpeTrainer::new(TrainerConfig {
            num_merges: 10,
            parallel: false,
        });
        let vocab = SymbolVocab::from_corpus_words(["ab_"]);
        let outcome = trainer.train(vec![("ab_", 1u64)], vocab).unwrap();

        // a b _ -> a b_ -> ab_, then nothing is left to merge.
        assert_eq!(outcome.merges_applied(), 2);
        assert_eq!(outcome.merges_requested, 10);
        assert!(outcome.exhausted());
    }

    #[test]
    fn test_degenerate_corpus_is_an_error() {
        let trainer = BpeTrainer::with_num_merges(5);
        let vocab = SymbolVocab::from_corpus_words(["_"]);
        let err = trainer.train(vec![("_", 3u64)], vocab).unwrap_err();

        assert!(matches!(err, TokenizerError::NoMergeablePairs(_)));
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let trainer = BpeTrainer::with_num_merges(5);
        let err = trainer
            .train(Vec::<(&str, u64)>::new(), SymbolVocab::ascii_lowercase())
            .unwrap_err();

        assert!(matches!(err, TokenizerError::NoMergeablePairs(_)));
    }

    #[test]
    fn test_zero_merges_rejected() {
        let trainer = BpeTrainer::with_num_merges(0);
        let err = trainer.train(sample_counts(), sample_vocab()).unwrap_err();

        assert!(matches!(err, TokenizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_parallel_counting_same_merges() {
        let sequential = train(10);

        let trainer = BpeTrainer::new(TrainerConfig {
            num_merges: 10,
            parallel: true,
        });
        let parallel = trainer.train(sample_counts(), sample_vocab()).unwrap();

        let merges_a: Vec<_> = sequential
            .history
            .iter()
            .map(|r| r.merged.clone())
            .collect();
        let merges_b: Vec<_> = parallel.history.iter().map(|r| r.merged.clone()).collect();
        assert_eq!(merges_a, merges_b);
    }
}
