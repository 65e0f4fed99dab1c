//! Model persistence.
//!
//! Trained models are saved either as a single versioned
//! `tokenizer.json` document or as plain-text `vocab.txt` + `merges.txt`
//! files; both directions of both formats live here.

pub mod format;
pub mod load;
pub mod save;

pub use format::{ModelFormat, SerializedConfig, SerializedMerge, SerializedModel};
pub use load::ModelLoader;
pub use save::ModelSaver;
