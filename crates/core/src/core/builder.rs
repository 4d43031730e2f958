//! Vocabulary and merge-rank construction from a merges resource.
//!
//! The resource is plain text: a header line followed by one merge rule per
//! line, each rule holding two whitespace-separated symbols. Line order is
//! merge priority.

use crate::core::merges::MergeRanks;
use crate::core::vocab::Vocabulary;
use crate::encoding::ByteLevelMapper;
use crate::error::{Result, TokenizerError};

/// Suffix marking the last symbol of a pretoken.
pub const END_OF_WORD: &str = "</w>";

/// Start-of-text special token.
pub const START_OF_TEXT: &str = "<|startoftext|>";

/// End-of-text special token.
pub const END_OF_TEXT: &str = "<|endoftext|>";

/// Total vocabulary budget the CLIP merges list was cut to.
pub const CLIP_VOCAB_BUDGET: usize = 49_152;

/// Number of merge rules read from the resource by default.
pub const DEFAULT_MERGE_LIMIT: usize = CLIP_VOCAB_BUDGET - 256 - 2;

/// Prefix every header line of a well-formed merges resource carries.
pub const MERGES_HEADER_PREFIX: &str = "#version";

/// Immutable vocabulary and merge-rank table built from one merges resource.
#[derive(Debug, Clone, Default)]
pub struct BpeModel {
    /// Token <-> ID mapping
    pub vocab: Vocabulary,
    /// Pair -> rank
    pub ranks: MergeRanks,
}

impl BpeModel {
    /// Split the model into its vocabulary and merge-rank table.
    pub fn into_parts(self) -> (Vocabulary, MergeRanks) {
        (self.vocab, self.ranks)
    }
}

/// Builds a [`BpeModel`] from merges text.
///
/// In strict mode (the default) the header must be present, every rule line
/// must be well formed, and the resource must hold at least `merge_limit`
/// rules. Lenient mode accepts a shorter list and builds a smaller vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct VocabularyBuilder {
    merge_limit: usize,
    strict: bool,
}

impl Default for VocabularyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyBuilder {
    /// Create a builder with the CLIP merge limit in strict mode.
    pub fn new() -> Self {
        Self {
            merge_limit: DEFAULT_MERGE_LIMIT,
            strict: true,
        }
    }

    /// Set the number of rule lines read after the header.
    pub fn merge_limit(mut self, limit: usize) -> Self {
        self.merge_limit = limit;
        self
    }

    /// Enable or disable strict validation.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse the rule lines of `text`, honoring the header and the limit.
    fn parse_rules<'t>(&self, text: &'t str) -> Result<Vec<(&'t str, &'t str)>> {
        let mut lines = text.lines();

        let header = lines
            .next()
            .ok_or_else(|| TokenizerError::InvalidConfig("merges resource is empty".to_string()))?;
        if self.strict && !header.starts_with(MERGES_HEADER_PREFIX) {
            return Err(TokenizerError::InvalidConfig(format!(
                "merges resource header must start with '{}', found '{}'",
                MERGES_HEADER_PREFIX, header
            )));
        }

        let mut rules = Vec::with_capacity(self.merge_limit.min(DEFAULT_MERGE_LIMIT));
        let mut blank_at = None;

        // Line numbers are 1-based and count the header.
        for (index, line) in lines.take(self.merge_limit).enumerate() {
            let line_num = index + 2;
            if line.trim().is_empty() {
                blank_at.get_or_insert(line_num);
                continue;
            }
            if let Some(blank) = blank_at {
                return Err(TokenizerError::InvalidMerge {
                    line: blank,
                    content: String::new(),
                });
            }

            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(first), Some(second), None) => rules.push((first, second)),
                _ => {
                    return Err(TokenizerError::InvalidMerge {
                        line: line_num,
                        content: line.to_string(),
                    })
                }
            }
        }

        if rules.len() < self.merge_limit {
            if self.strict {
                return Err(TokenizerError::TruncatedMerges {
                    expected: self.merge_limit,
                    found: rules.len(),
                });
            }
            log::warn!(
                "merges resource holds {} rules, fewer than the limit of {}; vocabulary will be smaller",
                rules.len(),
                self.merge_limit
            );
        }

        Ok(rules)
    }

    /// Build the vocabulary and merge-rank table.
    ///
    /// IDs are assigned in this order: the 256 byte symbols, the 256 byte
    /// symbols with the end-of-word marker, one token per merge rule, then
    /// the start-of-text and end-of-text tokens.
    pub fn build(&self, text: &str) -> Result<BpeModel> {
        let rules = self.parse_rules(text)?;
        let mapper = ByteLevelMapper::global();

        let mut vocab = Vocabulary::with_capacity(512 + rules.len() + 2);
        let mut ranks = MergeRanks::with_capacity(rules.len());

        for symbol in mapper.symbols() {
            vocab.add_token(symbol.encode_utf8(&mut [0u8; 4]))?;
        }
        for symbol in mapper.symbols() {
            let mut token = String::with_capacity(4 + END_OF_WORD.len());
            token.push(symbol);
            token.push_str(END_OF_WORD);
            vocab.add_token(&token)?;
        }
        for &(first, second) in &rules {
            let mut token = String::with_capacity(first.len() + second.len());
            token.push_str(first);
            token.push_str(second);
            vocab.add_token(&token)?;
            ranks.add_merge(first, second);
        }
        vocab.add_special_tokens(START_OF_TEXT, END_OF_TEXT)?;

        log::info!(
            "built BPE vocabulary: {} merge rules, {} tokens",
            ranks.len(),
            vocab.len()
        );

        Ok(BpeModel { vocab, ranks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERGES: &str = "#version: 0.2\nh e\nl l\nhe ll\n";

    #[test]
    fn test_build_layout() {
        let model = VocabularyBuilder::new().merge_limit(3).build(MERGES).unwrap();
        let vocab = &model.vocab;

        assert_eq!(vocab.len(), 256 * 2 + 3 + 2);
        assert_eq!(vocab.get_token(0), Some("!"));
        assert_eq!(vocab.get_token(256), Some("!</w>"));
        assert_eq!(vocab.get_id("he"), Some(512));
        assert_eq!(vocab.get_id("ll"), Some(513));
        assert_eq!(vocab.get_id("hell"), Some(514));
        assert_eq!(vocab.special.start_of_text, Some(515));
        assert_eq!(vocab.special.end_of_text, Some(516));
        assert_eq!(vocab.get_id(START_OF_TEXT), Some(515));

        assert_eq!(model.ranks.rank("h", "e"), Some(0));
        assert_eq!(model.ranks.rank("he", "ll"), Some(2));
    }

    #[test]
    fn test_limit_ignores_extra_lines() {
        let model = VocabularyBuilder::new().merge_limit(2).build(MERGES).unwrap();
        assert_eq!(model.ranks.len(), 2);
        assert_eq!(model.vocab.get_id("hell"), None);
    }

    #[test]
    fn test_default_limit_matches_clip() {
        assert_eq!(DEFAULT_MERGE_LIMIT, 48_894);
    }

    #[test]
    fn test_strict_rejects_truncated() {
        let err = VocabularyBuilder::new().merge_limit(10).build(MERGES).unwrap_err();
        assert!(matches!(
            err,
            TokenizerError::TruncatedMerges {
                expected: 10,
                found: 3
            }
        ));
    }

    #[test]
    fn test_lenient_accepts_truncated() {
        let model = VocabularyBuilder::new()
            .merge_limit(10)
            .strict(false)
            .build(MERGES)
            .unwrap();
        assert_eq!(model.ranks.len(), 3);
        assert_eq!(model.vocab.len(), 517);
    }

    #[test]
    fn test_strict_rejects_missing_header() {
        let err = VocabularyBuilder::new()
            .merge_limit(2)
            .build("h e\nl l\nhe ll\n")
            .unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_resource() {
        let err = VocabularyBuilder::new().strict(false).build("").unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_rule() {
        let err = VocabularyBuilder::new()
            .merge_limit(3)
            .build("#version: 0.2\nh e\nl l x\nhe ll\n")
            .unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMerge { line: 3, .. }));
    }

    #[test]
    fn test_blank_line_inside_rules() {
        let err = VocabularyBuilder::new()
            .merge_limit(3)
            .build("#version: 0.2\nh e\n\nhe ll\n")
            .unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidMerge { line: 3, .. }));
    }

    #[test]
    fn test_duplicate_merge_token() {
        let err = VocabularyBuilder::new()
            .merge_limit(4)
            .build("#version: 0.2\na b\nab c\na bc\nb c\n")
            .unwrap_err();
        assert!(matches!(err, TokenizerError::DuplicateToken(t) if t == "abc"));
    }

    #[test]
    fn test_into_parts() {
        let (vocab, ranks) = VocabularyBuilder::new()
            .merge_limit(3)
            .build(MERGES)
            .unwrap()
            .into_parts();
        assert_eq!(vocab.len(), 517);
        assert_eq!(ranks.len(), 3);
    }
}
