//! Benchmark command implementation.

use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Path to the trained model directory
    #[arg(short, long)]
    pub model: PathBuf,

    /// Path to a text file of words to segment
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

use anyhow::{Context, Result as AnyhowResult};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use subtok_tokenizer::Tokenizer;

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load(&cmd.model)?;

    let text = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input.display()))?;
    let words: Vec<String> = text.split_whitespace().map(|s| s.to_string()).collect();
    anyhow::ensure!(!words.is_empty(), "no words in {}", cmd.input.display());

    println!("Benchmarking segmentation...");
    println!("  Words: {}", words.len());
    println!("  Iterations: {}", cmd.iterations);
    println!();

    // Warmup
    let _ = tokenizer.segment_batch(&words)?;

    let start = Instant::now();
    for _ in 0..cmd.iterations {
        let _ = tokenizer.segment_batch(&words)?;
    }
    let elapsed = start.elapsed();

    let total_words = (words.len() * cmd.iterations) as f64;
    let avg_ms = elapsed.as_secs_f64() * 1000.0 / cmd.iterations as f64;

    println!("Results:");
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average per pass: {:.3}ms", avg_ms);
    println!(
        "  Throughput: {:.0} words/s",
        total_words / elapsed.as_secs_f64()
    );

    Ok(())
}
