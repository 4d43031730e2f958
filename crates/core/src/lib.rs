//! cliptok-core - Core byte-level BPE structures for the CLIP tokenizer
//!
//! This crate provides the data structures and algorithms shared by the
//! tokenizer: the byte to unicode symbol mapping, the vocabulary and
//! merge-rank table built from a trained merges list, and the greedy pair
//! merging procedure.
//!
//! # Example
//!
//! ```rust
//! use cliptok_core::{merge_word, VocabularyBuilder};
//!
//! let merges = "#version: 0.2\nh i</w>\n";
//! let model = VocabularyBuilder::new().merge_limit(1).build(merges)?;
//! assert_eq!(merge_word("hi", &model.ranks), "hi</w>");
//! assert_eq!(model.vocab.get_id("hi</w>"), Some(512));
//! # Ok::<(), cliptok_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE data structures
pub mod core;
pub use self::core::builder::{
    CLIP_VOCAB_BUDGET, DEFAULT_MERGE_LIMIT, END_OF_TEXT, END_OF_WORD, MERGES_HEADER_PREFIX,
    START_OF_TEXT,
};
pub use self::core::{
    BpeModel, MergeMap, MergeRanks, SpecialTokens, SymbolPair, Vocab, Vocabulary,
    VocabularyBuilder,
};

// Byte-level encoding
pub mod encoding;
pub use encoding::{initial_symbols, merge_symbols, merge_word, ByteLevelMapper};
