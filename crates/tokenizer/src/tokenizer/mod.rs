//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that integrates
//! the pre-tokenizer, the byte-level mapping, the BPE engine and the
//! vocabulary into encode/decode operations.

pub mod engine;

pub use engine::BpeEngine;

use crate::io::MergesLoader;
use crate::pre_tokenizer::{collapse_whitespace, Normalizer, PreTokenizer, Splitter, TextRepair};
use crate::utils::CacheStats;
use cliptok_core::{
    BpeModel, ByteLevelMapper, Result, SpecialTokens, TokenizerError, VocabularyBuilder,
    DEFAULT_MERGE_LIMIT, END_OF_WORD,
};
use compact_str::CompactString;
use std::path::Path;
use std::sync::Arc;

/// Placeholder `ids_to_tokens` renders for IDs outside the vocabulary.
pub const UNKNOWN_TOKEN_PLACEHOLDER: &str = "<UNK>";

/// What `encode` does with a merged symbol that has no vocabulary entry.
///
/// With the full byte coverage of a complete merges resource this cannot
/// happen; a truncated resource loaded leniently can produce such symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownSymbolPolicy {
    /// Skip the symbol and record it in [`Encoding::dropped`]
    #[default]
    Drop,
    /// Fail with [`TokenizerError::UnknownToken`]
    Reject,
}

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Number of merge rules read after the resource header
    pub merge_limit: usize,
    /// Fail on a truncated resource or a missing header
    pub strict_merges: bool,
    /// Handling of symbols missing from the vocabulary during encode
    pub unknown_symbols: UnknownSymbolPolicy,
    /// Repair mojibake and similar artifacts before segmentation
    pub repair_text: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            merge_limit: DEFAULT_MERGE_LIMIT,
            strict_merges: true,
            unknown_symbols: UnknownSymbolPolicy::Drop,
            repair_text: true,
        }
    }
}

impl TokenizerConfig {
    fn vocabulary_builder(&self) -> VocabularyBuilder {
        VocabularyBuilder::new()
            .merge_limit(self.merge_limit)
            .strict(self.strict_merges)
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of merge rules read from the resource.
    pub fn merge_limit(mut self, limit: usize) -> Self {
        self.config.merge_limit = limit;
        self
    }

    /// Enable or disable strict validation of the merges resource.
    pub fn strict_merges(mut self, strict: bool) -> Self {
        self.config.strict_merges = strict;
        self
    }

    /// Set the policy for symbols missing from the vocabulary.
    pub fn unknown_symbols(mut self, policy: UnknownSymbolPolicy) -> Self {
        self.config.unknown_symbols = policy;
        self
    }

    /// Enable or disable the text repair stage.
    pub fn repair_text(mut self, repair: bool) -> Self {
        self.config.repair_text = repair;
        self
    }

    /// Get the configuration built so far.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Build the tokenizer from merges text.
    pub fn build(self, merges: &str) -> Result<Tokenizer> {
        let model = self.config.vocabulary_builder().build(merges)?;
        Ok(Tokenizer::from_model(Arc::new(model), self.config))
    }

    /// Build the tokenizer from a merges file (gzip or plain text).
    pub fn load(self, path: &Path) -> Result<Tokenizer> {
        let merges = MergesLoader::read(path)?;
        self.build(&merges)
    }
}

/// Main tokenizer struct.
///
/// Encoding memoizes merged pretokens and therefore takes `&mut self`; use
/// [`Tokenizer::fork`] to get independent instances over the same model.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Byte to symbol mapping
    mapper: &'static ByteLevelMapper,
    /// Memoizing BPE engine; owns the shared model
    engine: BpeEngine,
    /// Normalizer and splitter
    pre_tokenizer: PreTokenizer,
    /// Configuration
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer over an already built model.
    pub fn from_model(model: Arc<BpeModel>, config: TokenizerConfig) -> Self {
        let normalizer = Normalizer::new(TextRepair::new(config.repair_text));
        Self {
            mapper: ByteLevelMapper::global(),
            engine: BpeEngine::new(model),
            pre_tokenizer: PreTokenizer::new(normalizer, Splitter::clip()),
            config,
        }
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Load a tokenizer with default configuration from a merges file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::builder().load(path)
    }

    /// A new tokenizer sharing this one's model and configuration, with an
    /// empty cache.
    pub fn fork(&self) -> Self {
        Self::from_model(Arc::clone(self.engine.model()), self.config.clone())
    }

    /// Encode text to token IDs.
    pub fn encode(&mut self, text: &str) -> Result<Encoding> {
        let normalized = self.pre_tokenizer.normalize(text);
        let model = Arc::clone(self.engine.model());
        let vocab = &model.vocab;

        let mut ids = Vec::new();
        let mut dropped = Vec::new();
        let mut symbols = String::new();

        for piece in self.pre_tokenizer.split(&normalized) {
            symbols.clear();
            symbols.extend(piece.bytes().map(|b| self.mapper.encode(b)));

            for symbol in self.engine.merge(&symbols).split(' ') {
                match vocab.get_id(symbol) {
                    Some(id) => ids.push(id),
                    None => match self.config.unknown_symbols {
                        UnknownSymbolPolicy::Drop => dropped.push(CompactString::new(symbol)),
                        UnknownSymbolPolicy::Reject => {
                            return Err(TokenizerError::UnknownToken(symbol.to_string()))
                        }
                    },
                }
            }
        }

        if !dropped.is_empty() {
            log::warn!(
                "dropped {} symbols missing from the vocabulary while encoding",
                dropped.len()
            );
        }

        Ok(Encoding { ids, dropped })
    }

    /// Encode text and return only the token IDs.
    pub fn encode_ids(&mut self, text: &str) -> Result<Vec<u32>> {
        self.encode(text).map(|encoding| encoding.ids)
    }

    /// Decode token IDs back to text.
    ///
    /// Fails with [`TokenizerError::UnknownTokenId`] on an ID outside the
    /// vocabulary. Invalid UTF-8 is replaced with U+FFFD.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let vocab = &self.engine.model().vocab;
        let mut symbols = String::with_capacity(ids.len() * 4);

        for &id in ids {
            let token = vocab
                .get_token(id)
                .ok_or(TokenizerError::UnknownTokenId(id))?;
            symbols.push_str(token);
        }

        let bytes = self.mapper.decode_str(&symbols);
        let text = String::from_utf8_lossy(&bytes).replace(END_OF_WORD, " ");

        Ok(collapse_whitespace(&text))
    }

    /// Map IDs to their token strings for display. IDs outside the
    /// vocabulary render as `<UNK>`.
    pub fn ids_to_tokens(&self, ids: &[u32]) -> Vec<String> {
        let vocab = &self.engine.model().vocab;
        ids.iter()
            .map(|&id| {
                vocab
                    .get_token(id)
                    .unwrap_or(UNKNOWN_TOKEN_PLACEHOLDER)
                    .to_string()
            })
            .collect()
    }

    /// Get the ID of a token string.
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.engine.model().vocab.get_id(token)
    }

    /// Get the token string of an ID.
    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.engine.model().vocab.get_token(id)
    }

    /// Get the special token IDs.
    pub fn special_tokens(&self) -> SpecialTokens {
        self.engine.model().vocab.special
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.engine.model().vocab.len()
    }

    /// Get the shared model.
    pub fn model(&self) -> &Arc<BpeModel> {
        self.engine.model()
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Get the pre-tokenizer.
    pub fn pre_tokenizer(&self) -> &PreTokenizer {
        &self.pre_tokenizer
    }

    /// Statistics of this instance's segmentation cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.engine.cache_stats()
    }
}

/// Result of encoding text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoding {
    /// Token IDs
    pub ids: Vec<u32>,
    /// Merged symbols skipped because they have no vocabulary entry
    pub dropped: Vec<CompactString>,
}

impl Encoding {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Check if any symbol was dropped.
    pub fn has_dropped(&self) -> bool {
        !self.dropped.is_empty()
    }
}
