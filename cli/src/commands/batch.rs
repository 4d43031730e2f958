//! Batch command implementation.
//!
//! Processes a file line by line and writes one tab-separated result line
//! per input line. Lines are processed on a rayon pool; every worker gets
//! its own forked tokenizer so caches are never shared between threads.

use super::{format_line, parse_ids};
use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use cliptok::Tokenizer;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Batch command arguments.
#[derive(Parser, Debug)]
pub struct BatchCommand {
    /// Input file with one text (or ID list with --reverse) per line
    #[arg(short, long)]
    pub file: PathBuf,

    /// Decode comma-separated token IDs instead of encoding text
    #[arg(short, long)]
    pub reverse: bool,

    /// Output file (defaults to <stem>_tokenizer.txt next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// Default output path: `<stem>_tokenizer.txt`, or `<stem>_tokenizer-rev.txt`
/// in reverse mode, in the input's directory.
pub fn default_output(input: &Path, reverse: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = if reverse { "-rev" } else { "" };
    input.with_file_name(format!("{}_tokenizer{}.txt", stem, suffix))
}

/// Encode or decode one input line. The line is trimmed first.
pub fn process_line(tokenizer: &mut Tokenizer, line: &str, reverse: bool) -> AnyhowResult<String> {
    let line = line.trim();
    if reverse {
        let ids = parse_ids(line)?;
        let text = tokenizer.decode(&ids)?;
        Ok(format_line(&text, &tokenizer.ids_to_tokens(&ids), &ids))
    } else {
        let ids = tokenizer.encode_ids(line)?;
        Ok(format_line(line, &tokenizer.ids_to_tokens(&ids), &ids))
    }
}

/// Process every line of `input` and return the output lines in input order.
pub fn process_lines(
    tokenizer: &Tokenizer,
    input: &str,
    reverse: bool,
) -> AnyhowResult<Vec<String>> {
    let lines: Vec<(usize, &str)> = input.lines().enumerate().collect();

    lines
        .par_iter()
        .map_init(
            || tokenizer.fork(),
            |worker, &(index, line)| {
                process_line(worker, line, reverse)
                    .with_context(|| format!("line {}", index + 1))
            },
        )
        .collect()
}

pub fn run(cmd: BatchCommand, tokenizer: Tokenizer) -> AnyhowResult<()> {
    let input = fs::read_to_string(&cmd.file)
        .with_context(|| format!("failed to read {}", cmd.file.display()))?;
    let output_path = cmd
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cmd.file, cmd.reverse));

    let results = match cmd.jobs {
        Some(jobs) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .context("failed to build thread pool")?;
            pool.install(|| process_lines(&tokenizer, &input, cmd.reverse))?
        }
        None => process_lines(&tokenizer, &input, cmd.reverse)?,
    };

    let file = fs::File::create(&output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in &results {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;

    log::info!("processed {} lines", results.len());
    println!(
        "Processing completed. Results saved to '{}'",
        output_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERGES: &str = "#version: 0.2\nh e\nl l\nhe ll\nhell o</w>\n";

    fn tokenizer() -> Tokenizer {
        Tokenizer::builder().merge_limit(4).build(MERGES).unwrap()
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("data/captions.txt"), false),
            PathBuf::from("data/captions_tokenizer.txt")
        );
        assert_eq!(
            default_output(Path::new("data/ids.csv"), true),
            PathBuf::from("data/ids_tokenizer-rev.txt")
        );
        assert_eq!(
            default_output(Path::new("plain"), false),
            PathBuf::from("plain_tokenizer.txt")
        );
    }

    #[test]
    fn test_process_line_encode() {
        let mut tokenizer = tokenizer();
        let line = process_line(&mut tokenizer, "  Hello!\n", false).unwrap();
        assert_eq!(line, "Hello!\t['hello</w>', '!</w>']\t515,256");
    }

    #[test]
    fn test_process_line_decode() {
        let mut tokenizer = tokenizer();
        let line = process_line(&mut tokenizer, "515,256", true).unwrap();
        assert_eq!(line, "hello !\t['hello</w>', '!</w>']\t515,256");
    }

    #[test]
    fn test_empty_reverse_line_decodes_to_nothing() {
        let mut tokenizer = tokenizer();
        assert_eq!(process_line(&mut tokenizer, "", true).unwrap(), "\t[]\t");
    }

    #[test]
    fn test_process_lines_keeps_order() {
        let tokenizer = tokenizer();
        let input = "hello\n!\nhello hello\n";
        let lines = process_lines(&tokenizer, input, false).unwrap();

        assert_eq!(
            lines,
            vec![
                "hello\t['hello</w>']\t515",
                "!\t['!</w>']\t256",
                "hello hello\t['hello</w>', 'hello</w>']\t515,515",
            ]
        );
    }

    #[test]
    fn test_unknown_id_reports_line() {
        let tokenizer = tokenizer();
        let err = process_lines(&tokenizer, "515\n99999\n", true).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("captions.txt");
        fs::write(&input, "hello\nHELLO!\n").unwrap();

        let cmd = BatchCommand {
            file: input.clone(),
            reverse: false,
            output: None,
            jobs: Some(2),
        };
        run(cmd, tokenizer()).unwrap();

        let output = fs::read_to_string(dir.path().join("captions_tokenizer.txt")).unwrap();
        assert_eq!(
            output,
            "hello\t['hello</w>']\t515\nHELLO!\t['hello</w>', '!</w>']\t515,256\n"
        );
    }
}
