use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};

/// Token joining the two entity ids of a pair slug
pub const SLUG_SEPARATOR: &str = "-vs-";

/// An unordered combination of two distinct entities, stored in catalog
/// order (`left` comes before `right` in the catalog it was built from).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub left: String,
    pub right: String,
    pub slug: String,
}

impl Pair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        let left = left.into();
        let right = right.into();
        let slug = pair_slug(&left, &right);
        Self { left, right, slug }
    }

    /// Route path for this pair
    pub fn path(&self) -> String {
        format!("/compare/{}", self.slug)
    }
}

/// Canonical slug for two entity ids
pub fn pair_slug(left: &str, right: &str) -> String {
    format!("{}{}{}", left, SLUG_SEPARATOR, right)
}

/// Every unordered pair of the catalog exactly once, outer index before
/// inner index. A catalog with fewer than two entities yields no pairs.
pub fn enumerate_pairs(catalog: &Catalog) -> Vec<Pair> {
    let entities = catalog.entities();
    let mut pairs = Vec::with_capacity(pair_count(entities.len()));
    for (i, left) in entities.iter().enumerate() {
        for right in &entities[i + 1..] {
            pairs.push(Pair::new(&left.id, &right.id));
        }
    }
    pairs
}

/// N choose 2
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::entity;
    use std::collections::HashSet;

    fn catalog_of(n: usize) -> Catalog {
        Catalog::new((0..n).map(|i| entity(&format!("model-{}", i))).collect()).unwrap()
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(19), 171);
    }

    #[test]
    fn test_enumerate_small_catalogs_yield_nothing() {
        assert!(enumerate_pairs(&Catalog::empty()).is_empty());
        assert!(enumerate_pairs(&catalog_of(1)).is_empty());
    }

    #[test]
    fn test_enumerate_order_and_slugs() {
        let catalog = Catalog::new(vec![entity("a"), entity("b"), entity("c")]).unwrap();
        let slugs: Vec<String> = enumerate_pairs(&catalog)
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["a-vs-b", "a-vs-c", "b-vs-c"]);
    }

    #[test]
    fn test_enumerate_is_complete_and_unique() {
        for n in 0..=20 {
            let pairs = enumerate_pairs(&catalog_of(n));
            assert_eq!(pairs.len(), pair_count(n));

            let unordered: HashSet<(String, String)> = pairs
                .iter()
                .map(|p| {
                    assert_ne!(p.left, p.right, "self pair for n={}", n);
                    let mut ids = [p.left.clone(), p.right.clone()];
                    ids.sort();
                    (ids[0].clone(), ids[1].clone())
                })
                .collect();
            assert_eq!(unordered.len(), pairs.len());
        }
    }

    #[test]
    fn test_pair_path() {
        let pair = Pair::new("gpt-4o", "claude-4-1-opus");
        assert_eq!(pair.slug, "gpt-4o-vs-claude-4-1-opus");
        assert_eq!(pair.path(), "/compare/gpt-4o-vs-claude-4-1-opus");
    }
}
