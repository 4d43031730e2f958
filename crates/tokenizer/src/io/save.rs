//! Export of a built model to disk.

use super::format::{write_merges, write_vocab, MERGES_FILE, VOCAB_FILE};
use cliptok_core::{BpeModel, Result, TokenizerError};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Tokenizer saver - writes a model in HuggingFace layout.
pub struct TokenizerSaver<'a> {
    /// Model reference
    model: &'a BpeModel,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new tokenizer saver.
    pub fn new(model: &'a BpeModel) -> Self {
        Self { model }
    }

    /// Save in HuggingFace format (vocab.json + merges.txt).
    ///
    /// This creates two files:
    /// - `vocab.json`: Token to ID mapping, keys in ID order
    /// - `merges.txt`: Header line, then merge rules in rank order
    ///
    /// The written `merges.txt` can be loaded back as a merges resource.
    pub fn save_huggingface(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| {
            TokenizerError::Save(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })?;

        let vocab_path = path.join(VOCAB_FILE);
        let vocab_writer = BufWriter::new(Self::create(&vocab_path)?);
        write_vocab(vocab_writer, &self.model.vocab).map_err(|err| TokenizerError::Io {
            path: vocab_path.clone(),
            err,
        })?;

        let merges_path = path.join(MERGES_FILE);
        let merges_writer = BufWriter::new(Self::create(&merges_path)?);
        write_merges(merges_writer, &self.model.ranks)
            .map_err(|e| TokenizerError::Save(format!("Failed to write merges: {}", e)))?;

        log::info!(
            "exported {} tokens and {} merges to {}",
            self.model.vocab.len(),
            self.model.ranks.len(),
            path.display()
        );

        Ok(())
    }

    fn create(path: &Path) -> Result<File> {
        File::create(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MergesLoader;
    use cliptok_core::VocabularyBuilder;
    use std::collections::HashMap;

    const MERGES: &str = "#version: 0.2\nh e\nl l\nhe ll\nhell o</w>\n";

    #[test]
    fn test_export_then_reload() {
        let model = VocabularyBuilder::new()
            .merge_limit(4)
            .build(MERGES)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        TokenizerSaver::new(&model)
            .save_huggingface(dir.path())
            .unwrap();

        let text = MergesLoader::read(&dir.path().join(MERGES_FILE)).unwrap();
        assert_eq!(text, MERGES);

        let reloaded = VocabularyBuilder::new().merge_limit(4).build(&text).unwrap();
        assert_eq!(reloaded.vocab.len(), model.vocab.len());
        assert!(reloaded.vocab.iter().eq(model.vocab.iter()));
    }

    #[test]
    fn test_vocab_json_contents() {
        let model = VocabularyBuilder::new()
            .merge_limit(4)
            .build(MERGES)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        TokenizerSaver::new(&model)
            .save_huggingface(dir.path())
            .unwrap();

        let json = std::fs::read_to_string(dir.path().join(VOCAB_FILE)).unwrap();
        let vocab: HashMap<String, u32> = serde_json::from_str(&json).unwrap();

        assert_eq!(vocab.len(), model.vocab.len());
        assert_eq!(vocab["!"], 0);
        assert_eq!(vocab["hello</w>"], 515);
        assert_eq!(vocab["<|endoftext|>"], 517);
    }

    #[test]
    fn test_creates_missing_directory() {
        let model = VocabularyBuilder::new()
            .merge_limit(1)
            .build("#version: 0.2\nh e\n")
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("export");
        TokenizerSaver::new(&model).save_huggingface(&target).unwrap();

        assert!(target.join(VOCAB_FILE).is_file());
        assert!(target.join(MERGES_FILE).is_file());
    }
}
