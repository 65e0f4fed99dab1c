//! Inspect command implementation.

use clap::Parser;

/// Inspect command arguments.
#[derive(Parser)]
pub struct InspectCommand {
    /// Path to the trained model directory
    #[arg(short, long)]
    pub model: PathBuf,

    /// Load the model from vocab.txt + merges.txt
    #[arg(long)]
    pub text_format: bool,

    /// How many merges to show from each end of the history
    #[arg(short, long, default_value_t = 5)]
    pub limit: usize,

    /// Dump the full vocabulary and merge history
    #[arg(long)]
    pub full: bool,
}

use anyhow::Result as AnyhowResult;
use std::path::PathBuf;
use subtok_tokenizer::Tokenizer;

pub fn run(cmd: InspectCommand) -> AnyhowResult<()> {
    let tokenizer = if cmd.text_format {
        Tokenizer::load_text(&cmd.model)?
    } else {
        Tokenizer::load(&cmd.model)?
    };

    let history = tokenizer.history();
    let config = tokenizer.config();

    println!("Model        : {}", cmd.model.display());
    println!("Vocab size   : {}", tokenizer.vocab_size());
    println!("Merges       : {}", history.len());
    println!("Normalization: {}", config.normalization.as_str());
    println!();

    if cmd.full {
        println!("Vocabulary:");
        for (id, symbol) in tokenizer.vocab().iter().enumerate() {
            println!("  {:>6}  {}", id, symbol);
        }
        println!();

        println!("Merge history:");
        for (rank, record) in history.iter().enumerate() {
            println!(
                "  {:>6}  {} + {} -> {} (count {})",
                rank, record.left, record.right, record.merged, record.count
            );
        }
        return Ok(());
    }

    if history.is_empty() {
        println!("No merges recorded.");
        return Ok(());
    }

    let shown = cmd.limit.min(history.len());
    println!("First {} merges:", shown);
    for (rank, record) in history.iter().take(shown).enumerate() {
        println!(
            "  {:>6}  {} + {} -> {} (count {})",
            rank, record.left, record.right, record.merged, record.count
        );
    }

    if history.len() > shown {
        println!("Last {} merges:", shown);
        let skip = history.len() - shown;
        for (offset, record) in history.iter().skip(skip).enumerate() {
            println!(
                "  {:>6}  {} + {} -> {} (count {})",
                skip + offset,
                record.left,
                record.right,
                record.merged,
                record.count
            );
        }
    }

    Ok(())
}
