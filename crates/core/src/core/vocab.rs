//! Vocabulary storage and lookup.
//!
//! Token ids are positions in an append-only list; the forward map uses
//! `AHashMap` keyed by `CompactString` so most token strings stay inline.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Vocabulary with forward and reverse mappings.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    vocab: Vocab,
    /// Reverse mapping: ID -> token string
    tokens: Vec<CompactString>,
    /// Special token IDs (cached for fast access)
    pub special: SpecialTokens,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            tokens: Vec::with_capacity(capacity),
            special: SpecialTokens::default(),
        }
    }

    /// Append a token and return its ID.
    ///
    /// IDs are assigned in insertion order. A token that is already present is
    /// rejected, since every token must map to exactly one ID.
    pub fn add_token(&mut self, token: &str) -> Result<u32> {
        if self.vocab.contains_key(token) {
            return Err(TokenizerError::DuplicateToken(token.to_string()));
        }

        let token = CompactString::new(token);
        let id = self.tokens.len() as u32;
        self.tokens.push(token.clone());
        self.vocab.insert(token, id);

        Ok(id)
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(|s| s.as_str())
    }

    /// Tokens in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (id as u32, token.as_str()))
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Append the start-of-text and end-of-text tokens, in that order.
    pub fn add_special_tokens(&mut self, start_of_text: &str, end_of_text: &str) -> Result<()> {
        self.special.start_of_text = Some(self.add_token(start_of_text)?);
        self.special.end_of_text = Some(self.add_token(end_of_text)?);
        Ok(())
    }
}

/// Special token IDs cached for fast access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialTokens {
    /// `<|startoftext|>`
    pub start_of_text: Option<u32>,
    /// `<|endoftext|>`
    pub end_of_text: Option<u32>,
}
