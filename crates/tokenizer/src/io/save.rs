//! Saving trained models to disk.

use super::format::{SerializedConfig, SerializedMerge, SerializedModel};
use crate::tokenizer::TokenizerConfig;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use subtok_core::{MergeHistory, Result, SymbolVocab, TokenizerError};

/// Writes a trained model in either persistence format.
pub struct ModelSaver<'a> {
    vocab: &'a SymbolVocab,
    history: &'a MergeHistory,
    config: &'a TokenizerConfig,
}

impl<'a> ModelSaver<'a> {
    /// Create a saver over a trained model.
    pub fn new(
        vocab: &'a SymbolVocab,
        history: &'a MergeHistory,
        config: &'a TokenizerConfig,
    ) -> Self {
        Self {
            vocab,
            history,
            config,
        }
    }

    /// Save as a single `tokenizer.json` document in the directory.
    pub fn save(&self, dir: &Path) -> Result<()> {
        create_dir(dir)?;

        let path = dir.join("tokenizer.json");
        let file = File::create(&path).map_err(|err| TokenizerError::Io {
            path: path.clone(),
            err,
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.serialize())?;

        Ok(())
    }

    /// Save as plain-text `vocab.txt` (one symbol per line, insertion
    /// order) and `merges.txt` (one `left right` pair per line, rank
    /// order) in the directory.
    ///
    /// The text format carries no counts or configuration; models
    /// loaded from it segment identically but report zero merge counts.
    pub fn save_text(&self, dir: &Path) -> Result<()> {
        create_dir(dir)?;

        let vocab_path = dir.join("vocab.txt");
        let mut vocab_file = buffered(&vocab_path)?;
        for symbol in self.vocab.iter() {
            writeln!(vocab_file, "{}", symbol).map_err(|err| TokenizerError::Io {
                path: vocab_path.clone(),
                err,
            })?;
        }

        let merges_path = dir.join("merges.txt");
        let mut merges_file = buffered(&merges_path)?;
        for record in self.history.iter() {
            writeln!(merges_file, "{} {}", record.left, record.right).map_err(|err| {
                TokenizerError::Io {
                    path: merges_path.clone(),
                    err,
                }
            })?;
        }

        Ok(())
    }

    fn serialize(&self) -> SerializedModel {
        SerializedModel {
            version: env!("CARGO_PKG_VERSION").to_string(),
            symbols: self.vocab.iter().map(|s| s.to_string()).collect(),
            merges: self
                .history
                .iter()
                .map(|record| SerializedMerge {
                    left: record.left.to_string(),
                    right: record.right.to_string(),
                    count: record.count,
                })
                .collect(),
            config: SerializedConfig {
                num_merges: self.config.num_merges,
                parallel: self.config.parallel,
                normalization: self.config.normalization.as_str().to_string(),
                cache_capacity: self.config.cache_capacity,
            },
        }
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|err| TokenizerError::Io {
        path: dir.to_path_buf(),
        err,
    })
}

fn buffered(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|err| TokenizerError::Io {
        path: path.to_path_buf(),
        err,
    })?;
    Ok(BufWriter::new(file))
}
