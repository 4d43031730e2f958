//! Encode command implementation.

use super::format_line;
use anyhow::Result as AnyhowResult;
use clap::Parser;
use cliptok::Tokenizer;

/// Encode command arguments.
#[derive(Parser, Debug)]
pub struct EncodeCommand {
    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub text: String,
}

pub fn run(cmd: EncodeCommand, mut tokenizer: Tokenizer) -> AnyhowResult<()> {
    let text = if cmd.text == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        cmd.text
    };

    let encoding = tokenizer.encode(&text)?;
    let tokens = tokenizer.ids_to_tokens(&encoding.ids);

    println!("{}", format_line(&text, &tokens, &encoding.ids));

    Ok(())
}
