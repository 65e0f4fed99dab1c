//! Segment command implementation.

use clap::Parser;

/// Segment command arguments.
#[derive(Parser)]
pub struct SegmentCommand {
    /// Path to the trained model directory
    #[arg(short, long)]
    pub model: PathBuf,

    /// Words to segment; reads whitespace-separated words from stdin
    /// when neither words nor --input are given
    pub words: Vec<String>,

    /// Read words from a file instead of the command line
    #[arg(short, long, conflicts_with = "words")]
    pub input: Option<PathBuf>,

    /// Load the model from vocab.txt + merges.txt
    #[arg(long)]
    pub text_format: bool,

    /// Override the model's segmentation cache capacity
    #[arg(long)]
    pub cache_size: Option<usize>,
}

use anyhow::{Context, Result as AnyhowResult};
use std::io::Read;
use std::path::PathBuf;
use subtok_tokenizer::{SegmentationCache, Tokenizer};

pub fn run(cmd: SegmentCommand) -> AnyhowResult<()> {
    let tokenizer = if cmd.text_format {
        Tokenizer::load_text(&cmd.model)?
    } else {
        Tokenizer::load(&cmd.model)?
    };

    let words = gather_words(&cmd)?;
    let capacity = cmd
        .cache_size
        .unwrap_or(tokenizer.config().cache_capacity);
    let mut cache = SegmentationCache::with_capacity(capacity);

    for word in &words {
        let segmented = cache.get_or_segment(word, |raw| tokenizer.segment(raw))?;
        println!("{}", segmented);
    }

    let stats = cache.stats();
    log::debug!(
        "segmented {} words ({} cache hits, {} misses)",
        words.len(),
        stats.hits,
        stats.misses
    );

    Ok(())
}

fn gather_words(cmd: &SegmentCommand) -> AnyhowResult<Vec<String>> {
    if !cmd.words.is_empty() {
        return Ok(cmd.words.clone());
    }

    let content = match &cmd.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    Ok(content.split_whitespace().map(|s| s.to_string()).collect())
}
