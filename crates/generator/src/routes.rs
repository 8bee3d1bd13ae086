//! Static route binding: enumerated slugs out, slugs back to pairs.

use geo_compare_core::pairs::SLUG_SEPARATOR;
use geo_compare_core::{Catalog, CatalogIndex, Error, Pair, Result, enumerate_pairs};

pub const ROUTE_PREFIX: &str = "/compare/";

/// Every buildable comparison slug, in enumeration order
pub fn list_routes(catalog: &Catalog) -> Vec<String> {
    enumerate_pairs(catalog)
        .into_iter()
        .map(|pair| pair.slug)
        .collect()
}

/// Site path for a slug
pub fn route_path(slug: &str) -> String {
    format!("{}{}", ROUTE_PREFIX, slug)
}

/// Canonical pairs containing `id`, in enumeration order. Unknown ids
/// have none.
pub fn comparisons_for(catalog: &Catalog, id: &str) -> Vec<Pair> {
    let entities = catalog.entities();
    let Some(position) = entities.iter().position(|e| e.id == id) else {
        return Vec::new();
    };

    let before = entities[..position]
        .iter()
        .map(|left| Pair::new(&left.id, id));
    let after = entities[position + 1..]
        .iter()
        .map(|right| Pair::new(id, &right.id));
    before.chain(after).collect()
}

/// Recover the pair a slug was built from.
///
/// Only canonical slugs resolve: both ids must be in the catalog and the
/// left id must precede the right one in catalog order. Anything else is
/// [`Error::NotFound`].
pub fn resolve(slug: &str, catalog: &Catalog) -> Result<Pair> {
    resolve_with(slug, &catalog.index())
}

/// [`resolve`] against a prebuilt index
pub fn resolve_with(slug: &str, index: &CatalogIndex<'_>) -> Result<Pair> {
    let not_found = || Error::NotFound(slug.to_string());

    // Ids never contain the separator, so the first occurrence is the split
    let (left, right) = slug.split_once(SLUG_SEPARATOR).ok_or_else(not_found)?;
    let left_pos = index.position(left).ok_or_else(not_found)?;
    let right_pos = index.position(right).ok_or_else(not_found)?;
    if left_pos >= right_pos {
        return Err(not_found());
    }

    Ok(Pair::new(left, right))
}
