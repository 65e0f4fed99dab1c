//! The high-level tokenizer facade.
//!
//! `Tokenizer` ties the pieces together: pre-tokenization feeds word
//! counts into the trainer, the trainer produces the frozen vocabulary
//! and merge history, and segmentation reads them back out. Raw words
//! never carry the end-of-word marker at this level; the facade appends
//! it before handing anything to the core.

use crate::io::{ModelLoader, ModelSaver};
use crate::pre_tokenizer::{count_words, NormalizationForm, Normalizer, Splitter};
use std::path::Path;
use subtok_core::{mark_word, GreedySegmenter, MergeHistory, Result, SymbolVocab, TokenizerError};
use subtok_training::{BpeTrainer, TrainerConfig};

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Number of merge iterations during training
    pub num_merges: usize,
    /// Count pairs and segment batches with rayon
    pub parallel: bool,
    /// Unicode normalization applied before word counting
    pub normalization: NormalizationForm,
    /// Capacity hint for segmentation caches built over this model
    pub cache_capacity: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            num_merges: 1_000,
            parallel: true,
            normalization: NormalizationForm::default(),
            cache_capacity: 1000,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of merge iterations.
    pub fn num_merges(mut self, num_merges: usize) -> Self {
        self.config.num_merges = num_merges;
        self
    }

    /// Enable or disable rayon parallelism.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set the normalization form applied before word counting.
    pub fn normalization(mut self, form: NormalizationForm) -> Self {
        self.config.normalization = form;
        self
    }

    /// Set the capacity hint for segmentation caches.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        Tokenizer::new(self.config)
    }
}

/// What a training run did, in caller-visible terms.
#[derive(Debug, Clone)]
pub struct TrainSummary {
    /// Merges the configuration asked for
    pub merges_requested: usize,
    /// Merges actually applied before pairs ran out
    pub merges_applied: usize,
    /// Final learned segmentation of every training word, with counts
    pub segmentations: Vec<(String, u64)>,
}

impl TrainSummary {
    /// Whether training stopped early for lack of mergeable pairs.
    pub fn exhausted(&self) -> bool {
        self.merges_applied < self.merges_requested
    }
}

/// Subword tokenizer: trains a merge vocabulary and segments words.
pub struct Tokenizer {
    config: TokenizerConfig,
    vocab: SymbolVocab,
    history: MergeHistory,
}

impl Tokenizer {
    /// Create an untrained tokenizer with the given configuration.
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        if config.num_merges == 0 {
            return Err(TokenizerError::InvalidConfig(
                "num_merges must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            config,
            vocab: SymbolVocab::new(),
            history: MergeHistory::new(),
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Train from raw words and their corpus counts.
    ///
    /// Words must not contain either reserved marker; the end-of-word
    /// marker is appended here. The alphabet is derived from the corpus
    /// itself, so every training word is representable from the start.
    pub fn train_from_counts<I, S>(&mut self, counts: I) -> Result<TrainSummary>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut marked: Vec<(String, u64)> = counts
            .into_iter()
            .map(|(word, count)| mark_word(word.as_ref()).map(|marked| (marked, count)))
            .collect::<Result<_>>()?;

        // Word order fixes the vocabulary's symbol order; sorting keeps
        // it independent of map iteration order.
        marked.sort_by(|a, b| a.0.cmp(&b.0));

        let vocab = SymbolVocab::from_corpus_words(marked.iter().map(|(word, _)| word.as_str()));

        let trainer = BpeTrainer::new(TrainerConfig {
            num_merges: self.config.num_merges,
            parallel: self.config.parallel,
        });
        let outcome = trainer.train(marked, vocab)?;

        log::debug!(
            "trained: {} of {} merges, vocab size {}",
            outcome.merges_applied(),
            outcome.merges_requested,
            outcome.vocab.len()
        );

        let summary = TrainSummary {
            merges_requested: outcome.merges_requested,
            merges_applied: outcome.merges_applied(),
            segmentations: outcome.table.segmentations(),
        };

        self.vocab = outcome.vocab;
        self.history = outcome.history;

        Ok(summary)
    }

    /// Train from running text: normalize, split on whitespace, count
    /// words, then train on the counts.
    pub fn train_from_text(&mut self, text: &str) -> Result<TrainSummary> {
        let normalizer = Normalizer::new(self.config.normalization);
        let splitter = Splitter::whitespace();
        let counts = count_words(text, &normalizer, &splitter);

        self.train_from_counts(counts)
    }

    /// Segment a raw word into a space-joined string of known symbols.
    ///
    /// The end-of-word marker is appended before matching, so the
    /// output's final symbol is either marker-terminated or `[UNK]`.
    pub fn segment(&self, raw_word: &str) -> Result<String> {
        self.ensure_trained()?;

        let marked = mark_word(raw_word)?;
        let segmenter = GreedySegmenter::new(&self.vocab);
        let pieces = segmenter.segment_word(&marked)?;

        Ok(pieces.join(" "))
    }

    /// Segment a word that already carries the end-of-word marker.
    pub fn segment_marked(&self, word: &str) -> Result<String> {
        self.ensure_trained()?;

        let segmenter = GreedySegmenter::new(&self.vocab);
        let pieces = segmenter.segment_word(word)?;

        Ok(pieces.join(" "))
    }

    /// Segment many raw words, parallelized when configured.
    pub fn segment_batch(&self, raw_words: &[String]) -> Result<Vec<String>> {
        self.ensure_trained()?;

        if self.config.parallel {
            use rayon::prelude::*;

            raw_words.par_iter().map(|word| self.segment(word)).collect()
        } else {
            raw_words.iter().map(|word| self.segment(word)).collect()
        }
    }

    fn ensure_trained(&self) -> Result<()> {
        if self.vocab.is_empty() {
            return Err(TokenizerError::Training(
                "tokenizer has no vocabulary; train or load a model first".to_string(),
            ));
        }
        Ok(())
    }

    /// The frozen vocabulary.
    pub fn vocab(&self) -> &SymbolVocab {
        &self.vocab
    }

    /// The ordered merge history.
    pub fn history(&self) -> &MergeHistory {
        &self.history
    }

    /// Vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// The active configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Save as `tokenizer.json` in the directory.
    pub fn save(&self, dir: &Path) -> Result<()> {
        ModelSaver::new(&self.vocab, &self.history, &self.config).save(dir)
    }

    /// Save as plain-text `vocab.txt` + `merges.txt` in the directory.
    pub fn save_text(&self, dir: &Path) -> Result<()> {
        ModelSaver::new(&self.vocab, &self.history, &self.config).save_text(dir)
    }

    /// Load a model saved with [`Tokenizer::save`].
    pub fn load(dir: &Path) -> Result<Self> {
        let (vocab, history, config) = ModelLoader::load(dir)?;
        Ok(Self {
            config,
            vocab,
            history,
        })
    }

    /// Load a model saved with [`Tokenizer::save_text`].
    pub fn load_text(dir: &Path) -> Result<Self> {
        let (vocab, history, config) = ModelLoader::load_text(dir)?;
        Ok(Self {
            config,
            vocab,
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained(num_merges: usize) -> Tokenizer {
        let mut tokenizer = Tokenizer::builder()
            .num_merges(num_merges)
            .parallel(false)
            .build()
            .unwrap();
        tokenizer
            .train_from_counts(vec![
                ("fast", 4u64),
                ("faster", 3),
                ("tall", 5),
                ("taller", 4),
            ])
            .unwrap();
        tokenizer
    }

    #[test]
    fn test_builder_rejects_zero_merges() {
        assert!(Tokenizer::builder().num_merges(0).build().is_err());
    }

    #[test]
    fn test_train_appends_marker() {
        let tokenizer = trained(10);

        // The facade added the marker, so suffix units were learnable.
        assert!(tokenizer.vocab().contains("er_"));
        assert_eq!(tokenizer.history().len(), 10);
    }

    #[test]
    fn test_segment_raw_word() {
        let tokenizer = trained(10);

        assert_eq!(tokenizer.segment("tallest").unwrap(), "tall e st _");
        assert_eq!(tokenizer.segment("fatter").unwrap(), "fa t t er_");
    }

    #[test]
    fn test_segment_marked_word() {
        let tokenizer = trained(10);
        assert_eq!(tokenizer.segment_marked("tall_").unwrap(), "tall_");
    }

    #[test]
    fn test_segment_batch_matches_single() {
        let tokenizer = trained(10);
        let words = vec!["tallest".to_string(), "fatter".to_string()];

        let batch = tokenizer.segment_batch(&words).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], tokenizer.segment("tallest").unwrap());
        assert_eq!(batch[1], tokenizer.segment("fatter").unwrap());
    }

    #[test]
    fn test_untrained_segmentation_is_an_error() {
        let tokenizer = Tokenizer::builder().build().unwrap();
        assert!(matches!(
            tokenizer.segment("tall"),
            Err(TokenizerError::Training(_))
        ));
    }

    #[test]
    fn test_reserved_marker_in_raw_word_rejected() {
        let mut tokenizer = Tokenizer::builder().num_merges(2).build().unwrap();
        let err = tokenizer
            .train_from_counts(vec![("fa_st", 1u64)])
            .unwrap_err();
        assert!(matches!(err, TokenizerError::MalformedWord { .. }));

        let tokenizer = trained(10);
        assert!(tokenizer.segment("fa_st").is_err());
    }

    #[test]
    fn test_train_from_text_counts_words() {
        let mut tokenizer = Tokenizer::builder()
            .num_merges(3)
            .parallel(false)
            .build()
            .unwrap();
        let summary = tokenizer
            .train_from_text("tall tall tall fast\nfast tall")
            .unwrap();

        assert_eq!(summary.merges_applied, 3);
        let total: u64 = summary.segmentations.iter().map(|(_, count)| count).sum();
        assert_eq!(total, 6);
    }
}
