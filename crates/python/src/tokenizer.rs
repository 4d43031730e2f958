//! PyO3 wrapper for the Tokenizer struct

use cliptok::{Tokenizer, DEFAULT_MERGE_LIMIT};
use pyo3::prelude::*;
use std::path::PathBuf;

// Import the trait for error conversion
use crate::error::IntoPyErr;

/// Python wrapper for the CLIP tokenizer
#[pyclass(name = "Tokenizer")]
pub struct PyTokenizer {
    inner: Tokenizer,
}

#[pymethods]
impl PyTokenizer {
    /// Load a tokenizer from a merges resource (gzip or plain text)
    #[new]
    #[pyo3(signature = (merges_path, strict=true, merge_limit=DEFAULT_MERGE_LIMIT))]
    fn new(merges_path: PathBuf, strict: bool, merge_limit: usize) -> PyResult<Self> {
        let inner = Tokenizer::builder()
            .merge_limit(merge_limit)
            .strict_merges(strict)
            .load(&merges_path)
            .map_err(|e| e.into_py_err())?;
        Ok(PyTokenizer { inner })
    }

    /// Encode text to token IDs
    fn encode(&mut self, text: &str) -> PyResult<Vec<u32>> {
        self.inner.encode_ids(text).map_err(|e| e.into_py_err())
    }

    /// Encode text, also returning the symbols dropped as unknown
    fn encode_with_dropped(&mut self, text: &str) -> PyResult<(Vec<u32>, Vec<String>)> {
        let encoding = self.inner.encode(text).map_err(|e| e.into_py_err())?;
        let dropped = encoding.dropped.iter().map(|s| s.to_string()).collect();
        Ok((encoding.ids, dropped))
    }

    /// Decode token IDs back to text
    fn decode(&self, ids: Vec<u32>) -> PyResult<String> {
        self.inner.decode(&ids).map_err(|e| e.into_py_err())
    }

    /// Map token IDs to token strings, "<UNK>" for unknown IDs
    fn ids_to_tokens(&self, ids: Vec<u32>) -> Vec<String> {
        self.inner.ids_to_tokens(&ids)
    }

    /// Get the ID of a token string
    fn token_to_id(&self, token: &str) -> Option<u32> {
        self.inner.token_to_id(token)
    }

    /// Get the token string of an ID
    fn id_to_token(&self, id: u32) -> Option<String> {
        self.inner.id_to_token(id).map(str::to_string)
    }

    /// Get the vocabulary size
    fn vocab_size(&self) -> usize {
        self.inner.vocab_size()
    }

    /// Get a string representation
    fn __repr__(&self) -> String {
        format!("Tokenizer(vocab_size={})", self.inner.vocab_size())
    }

    fn __len__(&self) -> usize {
        self.inner.vocab_size()
    }
}
