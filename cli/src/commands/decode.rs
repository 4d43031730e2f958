//! Decode command implementation.

use super::{format_line, parse_ids};
use anyhow::Result as AnyhowResult;
use clap::Parser;
use cliptok::Tokenizer;

/// Decode command arguments.
#[derive(Parser, Debug)]
pub struct DecodeCommand {
    /// Comma-separated token IDs, e.g. 49406,3306,49407
    #[arg(short, long)]
    pub ids: String,
}

pub fn run(cmd: DecodeCommand, tokenizer: Tokenizer) -> AnyhowResult<()> {
    let ids = parse_ids(&cmd.ids)?;
    let text = tokenizer.decode(&ids)?;
    let tokens = tokenizer.ids_to_tokens(&ids);

    println!("{}", format_line(&text, &tokens, &ids));

    Ok(())
}
