//! Utility modules for the tokenizer.
//!
//! This module contains the segmentation cache used by the BPE engine.

pub mod cache;

pub use cache::{CacheStats, SegmentationCache};
