//! Core BPE data structures.
//!
//! This module contains the vocabulary, the merge-rank table and the builder
//! that derives both from a merges resource.

pub mod builder;
pub mod merges;
pub mod vocab;

pub use builder::{BpeModel, VocabularyBuilder};
pub use merges::{MergeMap, MergeRanks, SymbolPair};
pub use vocab::{SpecialTokens, Vocab, Vocabulary};
