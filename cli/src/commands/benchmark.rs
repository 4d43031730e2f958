//! Benchmark command implementation.

use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser, Debug)]
pub struct BenchmarkCommand {
    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: String,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

use anyhow::{ensure, Context, Result as AnyhowResult};
use cliptok::Tokenizer;
use std::fs;
use std::time::Instant;

pub fn run(cmd: BenchmarkCommand, mut tokenizer: Tokenizer) -> AnyhowResult<()> {
    ensure!(cmd.iterations > 0, "--iterations must be at least 1");

    let text = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input))?;

    println!("Benchmarking encoding...");
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", cmd.iterations);
    println!();

    // Cold pass fills the segmentation cache.
    let cold_start = Instant::now();
    let tokens = tokenizer.encode(&text)?.len();
    let cold = cold_start.elapsed();

    let start = Instant::now();
    for _ in 0..cmd.iterations {
        tokenizer.encode(&text)?;
    }
    let elapsed = start.elapsed();

    let avg_secs = elapsed.as_secs_f64() / cmd.iterations as f64;
    let stats = tokenizer.cache_stats();

    println!("Results:");
    println!("  Tokens per pass: {}", tokens);
    println!("  Cold pass: {:.3}ms", cold.as_secs_f64() * 1000.0);
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_secs * 1000.0);
    if avg_secs > 0.0 {
        println!("  Throughput: {:.0} tokens/s", tokens as f64 / avg_secs);
    }
    println!(
        "  Cache: {} entries, hit rate {:.1}%",
        stats.entries,
        stats.hit_rate.unwrap_or(0.0) * 100.0
    );

    Ok(())
}
