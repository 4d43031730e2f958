//! Pre-tokenization pipeline.
//!
//! Raw text is normalized (repaired, unescaped, whitespace-collapsed,
//! lowercased) and then split into pretokens, the units BPE merging is
//! applied to independently.

pub mod normalize;
pub mod repair;
pub mod split;

pub use normalize::{collapse_whitespace, Normalizer};
pub use repair::TextRepair;
pub use split::{Pieces, Splitter, CLIP_PATTERN};

/// Normalizer followed by the segmentation pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreTokenizer {
    normalizer: Normalizer,
    splitter: Splitter,
}

impl PreTokenizer {
    /// Create a pre-tokenizer.
    pub fn new(normalizer: Normalizer, splitter: Splitter) -> Self {
        Self {
            normalizer,
            splitter,
        }
    }

    /// Normalize raw text.
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    /// Split already-normalized text into pretokens.
    pub fn split<'r, 't>(&'r self, normalized: &'t str) -> Pieces<'r, 't> {
        self.splitter.split(normalized)
    }

    /// Normalize and split `text`.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let normalized = self.normalize(text);
        self.split(&normalized).map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment() {
        let pre = PreTokenizer::default();
        assert_eq!(
            pre.segment("  A photo of   TWO cats!! "),
            vec!["a", "photo", "of", "two", "cats", "!!"]
        );
    }

    #[test]
    fn test_segment_special_tokens() {
        let pre = PreTokenizer::default();
        assert_eq!(
            pre.segment("<|startoftext|>Hi there<|endoftext|>"),
            vec!["<|startoftext|>", "hi", "there", "<|endoftext|>"]
        );
    }

    #[test]
    fn test_segment_empty() {
        let pre = PreTokenizer::default();
        assert!(pre.segment("").is_empty());
        assert!(pre.segment(" \t\n").is_empty());
    }

    #[test]
    fn test_segment_escaped_entities() {
        let pre = PreTokenizer::default();
        assert_eq!(pre.segment("rock &amp;amp; roll"), vec!["rock", "&", "roll"]);
    }
}
