//! cliptok CLI - Command-line interface for the CLIP tokenizer.
//!
//! This is the main entry point for the `cliptok` command-line tool.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    BatchCommand, BenchmarkCommand, DecodeCommand, EncodeCommand, ExportCommand, TokenizerArgs,
};
use env_logger::Env;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "cliptok")]
#[command(about = "CLIP byte-level BPE tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    tokenizer: TokenizerArgs,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity (-q warn, -qq error)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text to token IDs
    Encode(EncodeCommand),
    /// Decode comma-separated token IDs back to text
    Decode(DecodeCommand),
    /// Encode or decode every line of a file
    Batch(BatchCommand),
    /// Write vocab.json and merges.txt
    Export(ExportCommand),
    /// Benchmark encoding performance
    Benchmark(BenchmarkCommand),
}

fn init_logging(verbose: u8, quiet: u8) {
    let level = if quiet > 0 {
        match quiet {
            1 => LevelFilter::Warn,
            _ => LevelFilter::Error,
        }
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    // RUST_LOG takes precedence over the flags.
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()));
    builder.format_timestamp_millis();
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let tokenizer = cli.tokenizer.load()?;

    match cli.command {
        Commands::Encode(cmd) => commands::encode::run(cmd, tokenizer)?,
        Commands::Decode(cmd) => commands::decode::run(cmd, tokenizer)?,
        Commands::Batch(cmd) => commands::batch::run(cmd, tokenizer)?,
        Commands::Export(cmd) => commands::export::run(cmd, tokenizer)?,
        Commands::Benchmark(cmd) => commands::benchmark::run(cmd, tokenizer)?,
    }

    Ok(())
}
