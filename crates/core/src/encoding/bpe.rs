//! Greedy pair merging over a single pretoken.
//!
//! This is the plain rescan algorithm: after every merge the lowest-ranked
//! adjacent pair is searched again from scratch. Pretokens are short, so the
//! quadratic rescan is cheaper in practice than maintaining a heap.

use crate::core::builder::END_OF_WORD;
use crate::core::merges::MergeRanks;
use compact_str::CompactString;

/// Split a pretoken into its initial symbols, appending the end-of-word marker
/// to the last character: `"cat"` becomes `["c", "a", "t</w>"]`.
pub fn initial_symbols(pretoken: &str) -> Vec<CompactString> {
    let mut symbols: Vec<CompactString> = pretoken
        .chars()
        .map(|ch| {
            let mut buf = [0u8; 4];
            CompactString::new(ch.encode_utf8(&mut buf))
        })
        .collect();

    if let Some(last) = symbols.last_mut() {
        last.push_str(END_OF_WORD);
    }

    symbols
}

/// Find the adjacent pair with the lowest rank.
///
/// Returns `(rank, index)` of the first occurrence of the best pair, or `None`
/// if no adjacent pair has a rank.
fn best_pair(word: &[CompactString], ranks: &MergeRanks) -> Option<(u32, usize)> {
    word.windows(2)
        .enumerate()
        .filter_map(|(i, w)| ranks.rank(&w[0], &w[1]).map(|rank| (rank, i)))
        .min_by_key(|&(rank, _)| rank)
}

/// Replace every non-overlapping occurrence of `(first, second)`, scanning left
/// to right, with the concatenated symbol.
fn merge_pair(word: &[CompactString], first: &str, second: &str) -> Vec<CompactString> {
    let mut merged = Vec::with_capacity(word.len());
    let mut i = 0;

    while i < word.len() {
        if i + 1 < word.len() && word[i] == first && word[i + 1] == second {
            let mut symbol = CompactString::with_capacity(first.len() + second.len());
            symbol.push_str(first);
            symbol.push_str(second);
            merged.push(symbol);
            i += 2;
        } else {
            merged.push(word[i].clone());
            i += 1;
        }
    }

    merged
}

/// Apply merge rules to `word` until no ranked pair remains or a single symbol
/// is left.
pub fn merge_symbols(mut word: Vec<CompactString>, ranks: &MergeRanks) -> Vec<CompactString> {
    while word.len() > 1 {
        let Some((_, index)) = best_pair(&word, ranks) else {
            break;
        };

        let first = word[index].clone();
        let second = word[index + 1].clone();
        word = merge_pair(&word, &first, &second);
    }

    word
}

/// Merge a byte-symbol pretoken and join the resulting symbols with spaces.
pub fn merge_word(pretoken: &str, ranks: &MergeRanks) -> String {
    merge_symbols(initial_symbols(pretoken), ranks).join(" ")
}
