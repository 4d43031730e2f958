//! Memoization of merged pretokens.
//!
//! The merge result of a pretoken depends only on the immutable rank table,
//! so entries never go stale. The cache grows with the number of distinct
//! pretokens seen and is never evicted.

use ahash::AHashMap;

/// Cache from byte-symbol pretoken to its space-joined merged symbols.
#[derive(Debug, Clone, Default)]
pub struct SegmentationCache {
    /// The cache storing pretoken -> merged symbols
    entries: AHashMap<String, String>,
    /// Lookups answered from the cache
    hits: u64,
    /// Lookups that ran the merge
    misses: u64,
}

impl SegmentationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entry without counting a lookup. Used for tokens that must
    /// bypass merging.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    /// Get the cached value for `key`, or compute and store it.
    pub fn get_or_insert_with<F>(&mut self, key: &str, compute: F) -> &str
    where
        F: FnOnce(&str) -> String,
    {
        if self.entries.contains_key(key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let value = compute(key);
            self.entries.insert(key.to_string(), value);
        }

        self.entries.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Look up a cached value without counting it.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: (lookups > 0).then(|| self.hits as f64 / lookups as f64),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that computed a new entry
    pub misses: u64,
    /// hits / (hits + misses), or None before the first lookup
    pub hit_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_miss() {
        let mut cache = SegmentationCache::new();

        let first = cache.get_or_insert_with("hello", |_| "hel lo</w>".to_string());
        assert_eq!(first, "hel lo</w>");

        let second = cache.get_or_insert_with("hello", |_| panic!("Should not merge"));
        assert_eq!(second, "hel lo</w>");

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate, Some(0.5));
    }

    #[test]
    fn test_insert_does_not_touch_other_entries() {
        let mut cache = SegmentationCache::new();
        cache.get_or_insert_with("a", |_| "a</w>".to_string());
        cache.get_or_insert_with("b", |_| "b</w>".to_string());
        cache.get_or_insert_with("a", |_| "changed".to_string());

        assert_eq!(cache.peek("a"), Some("a</w>"));
        assert_eq!(cache.peek("b"), Some("b</w>"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_seed() {
        let mut cache = SegmentationCache::new();
        cache.seed("<|endoftext|>", "<|endoftext|>");

        let value = cache.get_or_insert_with("<|endoftext|>", |_| panic!("seeded"));
        assert_eq!(value, "<|endoftext|>");
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn test_empty_stats() {
        let cache = SegmentationCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hit_rate, None);
    }
}
