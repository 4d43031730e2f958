//! Memoizing BPE engine.

use crate::utils::{CacheStats, SegmentationCache};
use cliptok_core::{merge_word, BpeModel, END_OF_TEXT, START_OF_TEXT};
use std::sync::Arc;

/// Applies merge rules to pretokens, caching every result.
///
/// Each engine owns its cache; engines built from the same model share only
/// the read-only rank table.
#[derive(Debug, Clone)]
pub struct BpeEngine {
    model: Arc<BpeModel>,
    cache: SegmentationCache,
}

impl BpeEngine {
    /// Create an engine with a fresh cache.
    ///
    /// The special tokens are seeded so they map to themselves and never
    /// receive the end-of-word marker.
    pub fn new(model: Arc<BpeModel>) -> Self {
        let mut cache = SegmentationCache::new();
        cache.seed(START_OF_TEXT, START_OF_TEXT);
        cache.seed(END_OF_TEXT, END_OF_TEXT);
        Self { model, cache }
    }

    /// Merge a byte-symbol pretoken and return its symbols joined by spaces.
    pub fn merge(&mut self, pretoken: &str) -> &str {
        let ranks = &self.model.ranks;
        self.cache
            .get_or_insert_with(pretoken, |token| merge_word(token, ranks))
    }

    /// The model this engine merges with.
    pub fn model(&self) -> &Arc<BpeModel> {
        &self.model
    }

    /// Statistics of this engine's cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cliptok_core::VocabularyBuilder;

    fn engine() -> BpeEngine {
        let model = VocabularyBuilder::new()
            .merge_limit(3)
            .build("#version: 0.2\nh e\nl l\nhe ll\n")
            .unwrap();
        BpeEngine::new(Arc::new(model))
    }

    #[test]
    fn test_merge() {
        let mut engine = engine();
        assert_eq!(engine.merge("hello"), "hell o</w>");
        assert_eq!(engine.merge("x"), "x</w>");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut engine = engine();
        let first = engine.merge("hello").to_string();
        let other = engine.merge("hell").to_string();
        let second = engine.merge("hello").to_string();

        assert_eq!(first, second);
        assert_eq!(engine.merge("hell"), other);

        let stats = engine.cache_stats();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn test_special_tokens_bypass_merging() {
        let mut engine = engine();
        assert_eq!(engine.merge(START_OF_TEXT), START_OF_TEXT);
        assert_eq!(engine.merge(END_OF_TEXT), END_OF_TEXT);
    }

    #[test]
    fn test_engines_do_not_share_cache() {
        let mut a = engine();
        let b = BpeEngine::new(Arc::clone(a.model()));
        a.merge("hello");
        assert_eq!(a.cache_stats().entries, 3);
        assert_eq!(b.cache_stats().entries, 2);
    }
}
