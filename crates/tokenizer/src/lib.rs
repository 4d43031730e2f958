//! cliptok - CLIP text tokenizer
//!
//! This crate turns free-form text into the integer token IDs a CLIP text
//! encoder expects, and renders IDs back into text. It integrates the text
//! normalization, regex segmentation, byte-level mapping and memoized BPE
//! merging into a single `Tokenizer`.
//!
//! # Features
//!
//! - Builder pattern for tokenizer configuration
//! - Gzip or plain merges resources
//! - ftfy-style text repair before segmentation
//! - Atomic `<|startoftext|>` / `<|endoftext|>` handling
//! - Export in HuggingFace layout (vocab.json + merges.txt)
//!
//! # Example
//!
//! ```rust
//! use cliptok::Tokenizer;
//!
//! let merges = "#version: 0.2\nh i</w>\n";
//! let mut tokenizer = Tokenizer::builder().merge_limit(1).build(merges)?;
//!
//! let encoding = tokenizer.encode("Hi!")?;
//! assert_eq!(tokenizer.ids_to_tokens(&encoding.ids), vec!["hi</w>", "!</w>"]);
//!
//! let text = tokenizer.decode(&encoding.ids)?;
//! assert_eq!(text, "hi !");
//! # Ok::<(), cliptok::TokenizerError>(())
//! ```

// Re-export core types
pub use cliptok_core::{BpeModel, Result, SpecialTokens, TokenizerError, DEFAULT_MERGE_LIMIT};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{
    Encoding, Tokenizer, TokenizerBuilder, TokenizerConfig, UnknownSymbolPolicy,
    UNKNOWN_TOKEN_PLACEHOLDER,
};

// IO/Serialization
pub mod io;
pub use io::{MergesLoader, TokenizerSaver};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{Normalizer, PreTokenizer, Splitter, TextRepair};

// Utilities
pub mod utils;
pub use utils::{CacheStats, SegmentationCache};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
