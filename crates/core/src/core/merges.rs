//! Merge-rank table.
//!
//! Merge rules are keyed by the pair of symbol strings they join. A pair's rank
//! is its position in the trained merges list; lower ranks merge first.

use ahash::AHashMap;
use compact_str::CompactString;

/// An ordered pair of symbols that can be merged.
pub type SymbolPair = (CompactString, CompactString);

/// Rank lookup: pair -> rank.
pub type MergeMap = AHashMap<SymbolPair, u32>;

/// Merge rules in rank order with constant-time rank lookup.
#[derive(Debug, Clone, Default)]
pub struct MergeRanks {
    /// Pair -> rank
    ranks: MergeMap,
    /// Pairs in rank order
    ordered: Vec<SymbolPair>,
}

impl MergeRanks {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ranks: MergeMap::with_capacity(capacity),
            ordered: Vec::with_capacity(capacity),
        }
    }

    /// Append a merge rule and return its rank.
    ///
    /// A pair that is already present takes the new (later) rank, the same
    /// result as building the table from the whole list with later entries
    /// overwriting earlier ones.
    pub fn add_merge(&mut self, first: &str, second: &str) -> u32 {
        let pair = (CompactString::new(first), CompactString::new(second));
        let rank = self.ordered.len() as u32;

        if let Some(previous) = self.ranks.insert(pair.clone(), rank) {
            log::debug!("merge rule {first} {second} repeated; rank {previous} replaced by {rank}");
        }
        self.ordered.push(pair);

        rank
    }

    /// Rank of the pair `(first, second)`, or `None` if it never merges.
    #[inline]
    pub fn rank(&self, first: &str, second: &str) -> Option<u32> {
        // Symbols up to 24 bytes are stored inline, so the key does not allocate.
        let key = (CompactString::new(first), CompactString::new(second));
        self.ranks.get(&key).copied()
    }

    /// Merge rules in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.ordered.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Number of merge rules read, including repeated pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
