//! Contrast coverage: which lenses and lens pairs already have a contrast

use crate::{Lens, RelationshipKind, RelationshipRef};
use std::collections::HashSet;

/// Index of existing contrast relationships
///
/// A lens is *covered* when it appears as source or target of any contrast.
/// Pairs are stored unordered, so `(a, b)` and `(b, a)` are the same pair.
#[derive(Debug, Clone, Default)]
pub struct CoverageIndex {
    covered: HashSet<String>,
    pairs: HashSet<(String, String)>,
}

impl CoverageIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from relationship references; non-contrast entries are ignored
    pub fn from_relationships<'a, I>(relationships: I) -> Self
    where
        I: IntoIterator<Item = &'a RelationshipRef>,
    {
        let mut index = Self::new();
        for rel in relationships {
            if rel.kind == RelationshipKind::Contrast {
                index.insert(&rel.source_id, &rel.target_id);
            }
        }
        index
    }

    /// Record a contrast between two lenses
    pub fn insert(&mut self, a: &str, b: &str) {
        self.covered.insert(a.to_string());
        self.covered.insert(b.to_string());
        self.pairs.insert(Self::key(a, b));
    }

    /// Whether the lens takes part in any contrast
    pub fn is_covered(&self, id: &str) -> bool {
        self.covered.contains(id)
    }

    /// Whether a contrast exists between the two lenses, in either direction
    pub fn has_pair(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&Self::key(a, b))
    }

    /// Number of distinct covered lenses
    pub fn covered_count(&self) -> usize {
        self.covered.len()
    }

    /// Number of distinct contrast pairs
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Split lenses into (covered, uncovered), preserving input order
    pub fn partition<'l>(&self, lenses: &'l [Lens]) -> (Vec<&'l Lens>, Vec<&'l Lens>) {
        lenses.iter().partition(|lens| self.is_covered(&lens.id))
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contrast(a: &str, b: &str) -> RelationshipRef {
        RelationshipRef::new(a, b, RelationshipKind::Contrast)
    }

    #[test]
    fn test_pairs_are_unordered() {
        let index = CoverageIndex::from_relationships(&[contrast("a", "b")]);
        assert!(index.has_pair("a", "b"));
        assert!(index.has_pair("b", "a"));
        assert!(!index.has_pair("a", "c"));
    }

    #[test]
    fn test_non_contrast_relationships_ignored() {
        let rels = vec![
            contrast("a", "b"),
            RelationshipRef::new("c", "d", RelationshipKind::parse("complement")),
        ];
        let index = CoverageIndex::from_relationships(&rels);
        assert!(index.is_covered("a"));
        assert!(index.is_covered("b"));
        assert!(!index.is_covered("c"));
        assert!(!index.has_pair("c", "d"));
        assert_eq!(index.pair_count(), 1);
    }

    #[test]
    fn test_partition_preserves_order() {
        let lenses = vec![
            Lens::new("a", "A", ""),
            Lens::new("x", "X", ""),
            Lens::new("b", "B", ""),
            Lens::new("y", "Y", ""),
        ];
        let index = CoverageIndex::from_relationships(&[contrast("b", "a")]);
        let (covered, uncovered) = index.partition(&lenses);

        let covered: Vec<_> = covered.iter().map(|l| l.id.as_str()).collect();
        let uncovered: Vec<_> = uncovered.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(covered, vec!["a", "b"]);
        assert_eq!(uncovered, vec!["x", "y"]);
    }

    #[test]
    fn test_insert_updates_coverage() {
        let mut index = CoverageIndex::new();
        assert_eq!(index.covered_count(), 0);

        index.insert("x", "y");
        assert!(index.is_covered("x"));
        assert!(index.is_covered("y"));
        assert!(index.has_pair("y", "x"));
        assert_eq!(index.covered_count(), 2);
    }
}
