//! CLI commands for the cliptok tokenizer.

pub mod batch;
pub mod benchmark;
pub mod decode;
pub mod encode;
pub mod export;

pub use batch::BatchCommand;
pub use benchmark::BenchmarkCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use export::ExportCommand;

use anyhow::{Context, Result};
use clap::Args;
use cliptok::{Tokenizer, DEFAULT_MERGE_LIMIT};
use std::fmt::Write;
use std::path::PathBuf;

/// Options selecting the merges resource, shared by every command.
#[derive(Args, Debug, Clone)]
pub struct TokenizerArgs {
    /// Path to the merges resource (gzip or plain text)
    #[arg(
        long,
        global = true,
        env = "CLIPTOK_MERGES",
        default_value = "bpe_simple_vocab_16e6.txt.gz"
    )]
    pub merges: PathBuf,

    /// Number of merge rules to read
    #[arg(long, global = true, default_value_t = DEFAULT_MERGE_LIMIT)]
    pub merge_limit: usize,

    /// Accept a truncated merges resource or a missing header
    #[arg(long, global = true)]
    pub lenient: bool,
}

impl TokenizerArgs {
    /// Build the tokenizer these options describe.
    pub fn load(&self) -> Result<Tokenizer> {
        Tokenizer::builder()
            .merge_limit(self.merge_limit)
            .strict_merges(!self.lenient)
            .load(&self.merges)
            .with_context(|| format!("failed to load merges from {}", self.merges.display()))
    }
}

/// One output line: text, token list and comma-joined IDs, tab separated.
pub fn format_line(text: &str, tokens: &[String], ids: &[u32]) -> String {
    format!("{}\t{}\t{}", text, python_list_repr(tokens), join_ids(ids))
}

/// Join IDs with commas.
pub fn join_ids(ids: &[u32]) -> String {
    let mut out = String::with_capacity(ids.len() * 6);
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", id);
    }
    out
}

/// Parse a comma-separated ID list. Surrounding whitespace is ignored and
/// an empty string is an empty list.
pub fn parse_ids(text: &str) -> Result<Vec<u32>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<u32>()
                .with_context(|| format!("invalid token id '{}'", part))
        })
        .collect()
}

/// Render strings the way a Python list literal prints, e.g. `['a</w>', 'b']`.
pub fn python_list_repr(items: &[String]) -> String {
    let mut out = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_python_str_repr(&mut out, item);
    }
    out.push(']');
    out
}

fn push_python_str_repr(out: &mut String, s: &str) {
    // Double quotes only when that avoids escaping a single quote.
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_python_list_repr() {
        assert_eq!(python_list_repr(&[]), "[]");
        assert_eq!(
            python_list_repr(&strings(&["hello</w>", "!</w>"])),
            "['hello</w>', '!</w>']"
        );
    }

    #[test]
    fn test_python_list_repr_quotes() {
        assert_eq!(python_list_repr(&strings(&["'s</w>"])), "[\"'s</w>\"]");
        assert_eq!(python_list_repr(&strings(&["\"</w>"])), "['\"</w>']");
        assert_eq!(python_list_repr(&strings(&["'\""])), r#"['\'"']"#);
        assert_eq!(python_list_repr(&strings(&["\\</w>"])), r"['\\</w>']");
    }

    #[test]
    fn test_format_line() {
        let line = format_line("hello", &strings(&["hello</w>"]), &[3306]);
        assert_eq!(line, "hello\t['hello</w>']\t3306");

        assert_eq!(format_line("", &[], &[]), "\t[]\t");
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("1,2, 3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_ids(" 49406 ").unwrap(), vec![49406]);
        assert!(parse_ids("").unwrap().is_empty());
        assert!(parse_ids("1,,2").is_err());
        assert!(parse_ids("1,x").is_err());
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[]), "");
        assert_eq!(join_ids(&[49406, 3306, 49407]), "49406,3306,49407");
    }
}
