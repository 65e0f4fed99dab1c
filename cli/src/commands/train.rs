//! Train command implementation.

use clap::Parser;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Path to a plain-text corpus (words split on whitespace)
    #[arg(short, long, required_unless_present = "counts", conflicts_with = "counts")]
    pub input: Option<PathBuf>,

    /// Path to a word-count table instead of raw text (one
    /// `word count` pair per line)
    #[arg(short, long)]
    pub counts: Option<PathBuf>,

    /// Output directory for the trained model
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number of merge iterations
    #[arg(short, long, default_value_t = 1_000)]
    pub merges: usize,

    /// Disable parallel pair counting
    #[arg(long)]
    pub sequential: bool,

    /// Save as vocab.txt + merges.txt instead of tokenizer.json
    #[arg(long)]
    pub text_format: bool,
}

use anyhow::{Context, Result as AnyhowResult};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use subtok_tokenizer::{Tokenizer, TrainSummary};

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    println!("Training tokenizer...");
    println!("  Merges: {}", cmd.merges);
    println!("  Parallel: {}", !cmd.sequential);
    println!();

    let mut tokenizer = Tokenizer::builder()
        .num_merges(cmd.merges)
        .parallel(!cmd.sequential)
        .build()?;

    let start = Instant::now();
    let summary = match (&cmd.input, &cmd.counts) {
        (Some(input), None) => {
            let text = fs::read_to_string(input)
                .with_context(|| format!("failed to read corpus {}", input.display()))?;
            println!("Read {} bytes from {}", text.len(), input.display());
            tokenizer.train_from_text(&text)?
        }
        (None, Some(counts)) => {
            let table = read_counts(counts)?;
            println!("Read {} word counts from {}", table.len(), counts.display());
            tokenizer.train_from_counts(table)?
        }
        // clap enforces exactly one of the two
        _ => unreachable!(),
    };
    report(&summary, start);

    println!("Final vocab size: {}", tokenizer.vocab_size());

    let start = Instant::now();
    if cmd.text_format {
        tokenizer.save_text(&cmd.output)?;
    } else {
        tokenizer.save(&cmd.output)?;
    }
    println!(
        "Model saved to {} in {:.2}s",
        cmd.output.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn read_counts(path: &PathBuf) -> AnyhowResult<Vec<(String, u64)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read counts {}", path.display()))?;

    let mut table = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let entry = match (parts.next(), parts.next(), parts.next()) {
            (Some(word), Some(count), None) => {
                let count: u64 = count.parse().with_context(|| {
                    format!("invalid count at line {}: '{}'", line_num + 1, line)
                })?;
                (word.to_string(), count)
            }
            _ => anyhow::bail!("expected 'word count' at line {}: '{}'", line_num + 1, line),
        };
        table.push(entry);
    }

    Ok(table)
}

fn report(summary: &TrainSummary, start: Instant) {
    println!(
        "Training completed in {:.2}s: {} of {} merges",
        start.elapsed().as_secs_f64(),
        summary.merges_applied,
        summary.merges_requested
    );
    if summary.exhausted() {
        log::warn!(
            "mergeable pairs ran out after {} merges; the vocabulary is as large as this corpus allows",
            summary.merges_applied
        );
    }
    println!();
}
