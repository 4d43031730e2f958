//! Python bindings for the cliptok tokenizer
//!
//! This module provides a Pythonic interface to the Rust CLIP tokenizer.

use pyo3::prelude::*;

mod error;
mod tokenizer;

use error::{TokenizerError, UnknownTokenIdError};
use tokenizer::PyTokenizer;

/// cliptok: CLIP byte-level BPE tokenizer in Rust
#[pymodule]
fn cliptok_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add_class::<PyTokenizer>()?;
    m.add("TokenizerError", py.get_type_bound::<TokenizerError>())?;
    m.add("UnknownTokenIdError", py.get_type_bound::<UnknownTokenIdError>())?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
