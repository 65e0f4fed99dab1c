//! Loading trained models from disk.

use super::format::SerializedModel;
use crate::pre_tokenizer::NormalizationForm;
use crate::tokenizer::TokenizerConfig;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use subtok_core::{MergeHistory, MergeRecord, Result, SymbolVocab, TokenizerError};

/// Reads a trained model in either persistence format.
pub struct ModelLoader;

impl ModelLoader {
    /// Load from a `tokenizer.json` document in the directory.
    pub fn load(dir: &Path) -> Result<(SymbolVocab, MergeHistory, TokenizerConfig)> {
        let path = dir.join("tokenizer.json");
        let file = File::open(&path).map_err(|err| TokenizerError::Io {
            path: path.clone(),
            err,
        })?;

        let reader = BufReader::new(file);
        let model: SerializedModel = serde_json::from_reader(reader)?;

        let normalization = NormalizationForm::parse(&model.config.normalization)
            .ok_or_else(|| {
                TokenizerError::Load(format!(
                    "unknown normalization form '{}'",
                    model.config.normalization
                ))
            })?;

        let config = TokenizerConfig {
            num_merges: model.config.num_merges,
            parallel: model.config.parallel,
            normalization,
            cache_capacity: model.config.cache_capacity,
        };

        let mut vocab = SymbolVocab::with_capacity(model.symbols.len());
        for symbol in &model.symbols {
            vocab.insert(symbol);
        }

        let mut history = MergeHistory::with_capacity(model.merges.len());
        for merge in &model.merges {
            let merged = format!("{}{}", merge.left, merge.right);
            if !vocab.contains(&merged) {
                return Err(TokenizerError::Load(format!(
                    "merge '{} {}' produces a symbol missing from the vocabulary",
                    merge.left, merge.right
                )));
            }
            history.push(MergeRecord {
                left: merge.left.as_str().into(),
                right: merge.right.as_str().into(),
                merged: merged.into(),
                count: merge.count,
            });
        }

        Ok((vocab, history, config))
    }

    /// Load from plain-text `vocab.txt` + `merges.txt` in the directory.
    ///
    /// The text format carries no configuration, so the returned model
    /// uses default settings; merge counts are reported as zero.
    pub fn load_text(dir: &Path) -> Result<(SymbolVocab, MergeHistory, TokenizerConfig)> {
        let vocab_path = dir.join("vocab.txt");
        let vocab_content =
            std::fs::read_to_string(&vocab_path).map_err(|err| TokenizerError::Io {
                path: vocab_path,
                err,
            })?;

        let mut vocab = SymbolVocab::new();
        for line in vocab_content.lines() {
            if !line.is_empty() {
                vocab.insert(line);
            }
        }

        let merges_path = dir.join("merges.txt");
        let merges_content =
            std::fs::read_to_string(&merges_path).map_err(|err| TokenizerError::Io {
                path: merges_path,
                err,
            })?;

        let mut history = MergeHistory::new();
        for (line_num, line) in merges_content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split(' ');
            let (left, right) = match (parts.next(), parts.next(), parts.next()) {
                (Some(left), Some(right), None) => (left, right),
                _ => {
                    return Err(TokenizerError::Load(format!(
                        "invalid merge at line {}: '{}'",
                        line_num + 1,
                        line
                    )));
                }
            };

            let merged = format!("{}{}", left, right);
            if !vocab.contains(&merged) {
                return Err(TokenizerError::Load(format!(
                    "merge '{}' at line {} produces a symbol missing from vocab.txt",
                    line,
                    line_num + 1
                )));
            }

            history.push(MergeRecord {
                left: left.into(),
                right: right.into(),
                merged: merged.into(),
                count: 0,
            });
        }

        Ok((vocab, history, TokenizerConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save::ModelSaver;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("subtok_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_model() -> (SymbolVocab, MergeHistory, TokenizerConfig) {
        let mut vocab = SymbolVocab::from_alphabet(["t", "a", "l"]);
        vocab.insert("ta");
        vocab.insert("tal");

        let mut history = MergeHistory::new();
        history.push(MergeRecord {
            left: "t".into(),
            right: "a".into(),
            merged: "ta".into(),
            count: 9,
        });
        history.push(MergeRecord {
            left: "ta".into(),
            right: "l".into(),
            merged: "tal".into(),
            count: 9,
        });

        (vocab, history, TokenizerConfig::default())
    }

    #[test]
    fn test_json_round_trip() {
        let dir = temp_dir("json_round_trip");
        let (vocab, history, config) = sample_model();

        ModelSaver::new(&vocab, &history, &config).save(&dir).unwrap();
        let (loaded_vocab, loaded_history, loaded_config) = ModelLoader::load(&dir).unwrap();

        assert_eq!(loaded_vocab.len(), vocab.len());
        let symbols: Vec<&str> = loaded_vocab.iter().collect();
        let expected: Vec<&str> = vocab.iter().collect();
        assert_eq!(symbols, expected);

        assert_eq!(loaded_history.len(), 2);
        assert_eq!(loaded_history.get(1).unwrap().merged, "tal");
        assert_eq!(loaded_history.get(0).unwrap().count, 9);
        assert_eq!(loaded_config.num_merges, config.num_merges);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_text_round_trip() {
        let dir = temp_dir("text_round_trip");
        let (vocab, history, config) = sample_model();

        ModelSaver::new(&vocab, &history, &config)
            .save_text(&dir)
            .unwrap();
        let (loaded_vocab, loaded_history, _) = ModelLoader::load_text(&dir).unwrap();

        let symbols: Vec<&str> = loaded_vocab.iter().collect();
        let expected: Vec<&str> = vocab.iter().collect();
        assert_eq!(symbols, expected);

        assert_eq!(loaded_history.len(), 2);
        assert_eq!(loaded_history.get(0).unwrap().merged, "ta");
        // Counts are not part of the text format.
        assert_eq!(loaded_history.get(0).unwrap().count, 0);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_load_rejects_dangling_merge() {
        let dir = temp_dir("dangling_merge");
        std::fs::write(dir.join("vocab.txt"), "t\na\n").unwrap();
        std::fs::write(dir.join("merges.txt"), "t a\n").unwrap();

        let err = ModelLoader::load_text(&dir).unwrap_err();
        assert!(matches!(err, TokenizerError::Load(_)));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let dir = temp_dir("missing_file");
        let err = ModelLoader::load(&dir).unwrap_err();
        assert!(matches!(err, TokenizerError::Io { .. }));

        std::fs::remove_dir_all(dir).ok();
    }
}
