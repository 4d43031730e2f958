//! Reading merges resources and exporting built models.
//!
//! This module loads the (optionally gzip-compressed) merges list a
//! tokenizer is built from, and writes a built model back out in the
//! HuggingFace `vocab.json` + `merges.txt` layout.

pub mod format;
pub mod load;
pub mod save;

pub use format::{write_merges, write_vocab, VocabJson, MERGES_FILE, MERGES_HEADER, VOCAB_FILE};
pub use load::MergesLoader;
pub use save::TokenizerSaver;
