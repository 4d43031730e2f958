//! Byte-level encoding.
//!
//! - `byte_level`: the byte to unicode symbol bijection
//! - `bpe`: greedy rank-ordered pair merging over one pretoken

pub mod bpe;
pub mod byte_level;

pub use bpe::{initial_symbols, merge_symbols, merge_word};
pub use byte_level::ByteLevelMapper;
