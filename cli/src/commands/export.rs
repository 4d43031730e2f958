//! Export command implementation.

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use cliptok::{Tokenizer, TokenizerSaver};
use std::path::PathBuf;

/// Export command arguments.
#[derive(Parser, Debug)]
pub struct ExportCommand {
    /// Directory to write vocab.json and merges.txt into
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(cmd: ExportCommand, tokenizer: Tokenizer) -> AnyhowResult<()> {
    TokenizerSaver::new(tokenizer.model())
        .save_huggingface(&cmd.output)
        .with_context(|| format!("failed to export to {}", cmd.output.display()))?;

    println!(
        "Exported {} tokens to {}",
        tokenizer.vocab_size(),
        cmd.output.display()
    );

    Ok(())
}
