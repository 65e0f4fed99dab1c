//! Serialization format for trained models.

use serde::{Deserialize, Serialize};

/// Model format types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Single tokenizer.json document
    Json,
    /// Plain-text vocab.txt + merges.txt
    Text,
}

/// One learned merge, in the order it was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedMerge {
    /// Left symbol of the pair
    pub left: String,
    /// Right symbol of the pair
    pub right: String,
    /// Pair frequency when the merge was chosen; 0 when the source
    /// format does not carry counts
    #[serde(default)]
    pub count: u64,
}

/// Tokenizer configuration in serialized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedConfig {
    pub num_merges: usize,
    pub parallel: bool,
    pub normalization: String,
    pub cache_capacity: usize,
}

/// Complete model document written to tokenizer.json.
///
/// Symbols appear in vocabulary insertion order; merges appear in the
/// order they were learned. The merged symbol of each record is the
/// concatenation of its pair and is not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Library version that wrote the document
    pub version: String,
    /// Vocabulary symbols in insertion order
    pub symbols: Vec<String>,
    /// Merge history in rank order
    pub merges: Vec<SerializedMerge>,
    /// Configuration the model was trained with
    pub config: SerializedConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_round_trip() {
        let model = SerializedModel {
            version: "0.2.0".to_string(),
            symbols: vec!["t".to_string(), "a".to_string(), "ta".to_string()],
            merges: vec![SerializedMerge {
                left: "t".to_string(),
                right: "a".to_string(),
                count: 9,
            }],
            config: SerializedConfig {
                num_merges: 10,
                parallel: true,
                normalization: "nfc".to_string(),
                cache_capacity: 1000,
            },
        };

        let json = serde_json::to_string(&model).unwrap();
        let back: SerializedModel = serde_json::from_str(&json).unwrap();

        assert_eq!(back.symbols, model.symbols);
        assert_eq!(back.merges, model.merges);
        assert_eq!(back.config.num_merges, 10);
    }

    #[test]
    fn test_missing_count_defaults_to_zero() {
        let json = r#"{"left": "t", "right": "a"}"#;
        let merge: SerializedMerge = serde_json::from_str(json).unwrap();
        assert_eq!(merge.count, 0);
    }
}
