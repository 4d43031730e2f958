//! Error handling for Python bindings

use cliptok::TokenizerError as RustTokenizerError;
use pyo3::{create_exception, exceptions::PyRuntimeError, PyErr};

// Custom Python exception for tokenizer errors
create_exception!(
    cliptok_py,
    TokenizerError,
    PyRuntimeError,
    "Error loading merges or during tokenization"
);

// Raised by `decode` for an ID outside the vocabulary
create_exception!(
    cliptok_py,
    UnknownTokenIdError,
    TokenizerError,
    "Token ID outside the vocabulary"
);

/// Convert a Rust TokenizerError to a Python exception
pub trait IntoPyErr {
    fn into_py_err(self) -> PyErr;
}

impl IntoPyErr for RustTokenizerError {
    fn into_py_err(self) -> PyErr {
        match self {
            RustTokenizerError::UnknownTokenId(_) => UnknownTokenIdError::new_err(self.to_string()),
            other => TokenizerError::new_err(other.to_string()),
        }
    }
}
