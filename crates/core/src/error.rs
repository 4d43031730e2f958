//! Error types for the CLIP tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Error loading the merges resource
    #[error("Load error: {0}")]
    Load(String),

    /// Error exporting vocabulary or merges
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration or resource header
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A merge rule line that does not hold exactly two symbols
    #[error("Invalid merge rule at line {line}: '{content}'")]
    InvalidMerge { line: usize, content: String },

    /// The merges resource holds fewer rules than the configured limit
    #[error("Merges resource is truncated: expected {expected} rules, found {found}")]
    TruncatedMerges { expected: usize, found: usize },

    /// The same token string was assigned two ids
    #[error("Duplicate vocabulary token: {0}")]
    DuplicateToken(String),

    /// Unknown token ID
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),

    /// Unknown token string
    #[error("Unknown token: {0}")]
    UnknownToken(String),
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
