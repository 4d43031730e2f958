//! Regex segmentation of normalized text into pretokens.

use regex::{Matches, Regex};
use std::sync::OnceLock;

/// CLIP segmentation pattern. Alternatives are tried left to right: the two
/// special tokens, English contraction suffixes, letter runs, single digits,
/// and runs of anything that is neither whitespace, letter nor digit.
pub const CLIP_PATTERN: &str = r"(?i)<\|startoftext\|>|<\|endoftext\|>|'s|'t|'re|'ve|'m|'ll|'d|\p{L}+|\p{N}|[^\s\p{L}\p{N}]+";

fn clip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CLIP_PATTERN).expect("CLIP segmentation pattern is valid"))
}

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    regex: &'static Regex,
}

impl Splitter {
    /// Create the CLIP splitter.
    pub fn clip() -> Self {
        Self {
            regex: clip_regex(),
        }
    }

    /// Lazily split text into pretokens. Whitespace is never yielded.
    ///
    /// The iterator borrows `text`; calling `split` again restarts from the
    /// beginning.
    pub fn split<'r, 't>(&'r self, text: &'t str) -> Pieces<'r, 't> {
        Pieces {
            matches: self.regex.find_iter(text),
        }
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::clip()
    }
}

/// Iterator over the pretokens of one text.
pub struct Pieces<'r, 't> {
    matches: Matches<'r, 't>,
}

impl<'r, 't> Iterator for Pieces<'r, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        self.matches.next().map(|m| m.as_str())
    }
}
