//! Error types for the subword tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Error during training
    #[error("Training error: {0}")]
    Training(String),

    /// No adjacent symbol pair is available for merging
    #[error("No mergeable pairs: {0}")]
    NoMergeablePairs(String),

    /// Word input that violates the reserved-marker discipline
    #[error("Malformed word '{word}': {reason}")]
    MalformedWord { word: String, reason: String },

    /// Error loading a trained model
    #[error("Load error: {0}")]
    Load(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown symbol string
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
