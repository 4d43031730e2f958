//! File formats for exported tokenizers.
//!
//! The HuggingFace layout is a `vocab.json` object (token -> ID) next to a
//! `merges.txt` holding a header line and one `first second` rule per line.

use cliptok_core::{MergeRanks, Vocabulary};
use serde::ser::{Serialize, Serializer};
use std::io::{self, Write};

/// Header line written at the top of an exported `merges.txt`.
pub const MERGES_HEADER: &str = "#version: 0.2";

/// File name of the exported vocabulary.
pub const VOCAB_FILE: &str = "vocab.json";

/// File name of the exported merge rules.
pub const MERGES_FILE: &str = "merges.txt";

/// Serializes a vocabulary as a JSON object whose keys appear in ID order.
pub struct VocabJson<'a>(pub &'a Vocabulary);

impl Serialize for VocabJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, token)| (token, id)))
    }
}

/// Write a vocabulary as pretty-printed JSON and flush the writer.
pub fn write_vocab<W: Write>(mut writer: W, vocab: &Vocabulary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, &VocabJson(vocab))?;
    writer.flush()
}

/// Write merge rules in rank order, preceded by [`MERGES_HEADER`].
pub fn write_merges<W: Write>(mut writer: W, ranks: &MergeRanks) -> io::Result<()> {
    writeln!(writer, "{}", MERGES_HEADER)?;
    for (first, second) in ranks.iter() {
        writeln!(writer, "{} {}", first, second)?;
    }
    writer.flush()
}
