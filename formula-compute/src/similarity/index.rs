//! Indexing of subexpressions, used to report and highlight the structure two formulas share.

use crate::symbolic::expr::SymExpr;
use std::collections::HashMap;

/// A distinct subexpression of an indexed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry<'a> {
    /// The first node in the tree with this structural key.
    pub node: &'a SymExpr,

    /// The preorder positions of every node with this structural key, ascending.
    pub positions: Vec<usize>,
}

/// Every subexpression of a tree, keyed by [`SymExpr::structural_key`].
#[derive(Debug, Clone, Default)]
pub struct SubexpressionIndex<'a> {
    entries: HashMap<String, IndexEntry<'a>>,
}

impl<'a> SubexpressionIndex<'a> {
    /// Indexes the tree in a single preorder traversal. The root is at position 0.
    pub fn build(expr: &'a SymExpr) -> Self {
        let mut entries: HashMap<String, IndexEntry<'a>> = HashMap::new();
        for (position, node) in expr.pre_order_iter().enumerate() {
            entries.entry(node.structural_key())
                .or_insert_with(|| IndexEntry { node, positions: Vec::new() })
                .positions
                .push(position);
        }
        Self { entries }
    }

    /// Returns the entry with the given structural key.
    pub fn get(&self, key: &str) -> Option<&IndexEntry<'a>> {
        self.entries.get(key)
    }

    /// Returns the number of distinct subexpressions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the keys present in both indexes, ordered by where they first appear in `other`.
    pub fn intersect<'b>(&self, other: &'b SubexpressionIndex<'_>) -> Vec<&'b str> {
        let mut shared = other.entries.iter()
            .filter(|(key, _)| self.entries.contains_key(key.as_str()))
            .map(|(key, entry)| (entry.positions[0], key.as_str()))
            .collect::<Vec<_>>();
        shared.sort_unstable();
        shared.into_iter().map(|(_, key)| key).collect()
    }
}

/// Finds every occurrence of `needle` in `haystack`, including overlapping ones. Each search
/// resumes one character after the start of the previous match.
///
/// Occurrences are `(start, length)` pairs counted in characters, not bytes. An empty `needle`
/// occurs nowhere.
pub fn locate_occurrences(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }

    let length = needle.chars().count();
    let mut occurrences = Vec::new();
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        occurrences.push((haystack[..start].chars().count(), length));
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    occurrences
}
