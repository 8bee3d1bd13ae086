//! The entity catalog: the single source of truth every pair, route and
//! document is derived from.
//!
//! A [`Catalog`] can only be built through [`Catalog::new`] (or the
//! loaders that call it), so any value of this type has unique,
//! slug-safe ids and list attributes long enough for synthesis.

use crate::error::{Error, Result};
use crate::pairs::SLUG_SEPARATOR;
use crate::types::Entity;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

/// Minimum length of the list attributes templates read positionally
pub const MIN_LIST_LEN: usize = 2;

/// Ordered, validated, immutable set of entities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entities: Vec<Entity>,
}

impl Catalog {
    /// Validate and wrap an ordered entity list.
    ///
    /// Fails fast on the first class of problem found, in this order:
    /// duplicate ids (all of them are reported), malformed ids, short
    /// list attributes.
    pub fn new(entities: Vec<Entity>) -> Result<Self> {
        let duplicates = duplicate_ids(&entities);
        if !duplicates.is_empty() {
            return Err(Error::DuplicateEntityId(duplicates));
        }

        for entity in &entities {
            if let Some(reason) = check_id(&entity.id) {
                return Err(Error::InvalidEntity {
                    id: entity.id.clone(),
                    reason,
                });
            }
            if let Some(reason) = check_lists(entity).into_iter().next() {
                return Err(Error::InvalidEntity {
                    id: entity.id.clone(),
                    reason,
                });
            }
        }

        Ok(Self { entities })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Read and validate a JSON catalog file. Any failure is fatal to the
    /// caller; see [`Catalog::load_or_empty`] for the degraded variant.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::CatalogLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let catalog = Self::from_json_str(&content).map_err(|e| match e {
            Error::CatalogLoad { reason, .. } => Error::CatalogLoad {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;
        tracing::debug!(
            path = %path.display(),
            entities = catalog.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse a JSON array of entity records (useful for testing)
    pub fn from_json_str(content: &str) -> Result<Self> {
        let entities: Vec<Entity> =
            serde_json::from_str(content).map_err(|e| Error::CatalogLoad {
                path: "<inline>".to_string(),
                reason: e.to_string(),
            })?;
        Self::new(entities)
    }

    /// Load for non-critical rendering: a missing or corrupt catalog
    /// degrades to an empty one instead of failing the caller.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "Catalog unavailable, rendering without data");
                Self::empty()
            }
        }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Build an id lookup over this catalog
    pub fn index(&self) -> CatalogIndex<'_> {
        CatalogIndex::new(self)
    }
}

/// Id -> (position, entity) lookup borrowed from a [`Catalog`]
#[derive(Debug, Clone)]
pub struct CatalogIndex<'a> {
    catalog: &'a Catalog,
    by_id: HashMap<&'a str, (usize, &'a Entity)>,
}

impl<'a> CatalogIndex<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        let by_id = catalog
            .entities
            .iter()
            .enumerate()
            .map(|(position, entity)| (entity.id.as_str(), (position, entity)))
            .collect();
        Self { catalog, by_id }
    }

    /// The catalog this index was built from
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn get(&self, id: &str) -> Option<&'a Entity> {
        self.by_id.get(id).map(|(_, entity)| *entity)
    }

    /// Like [`CatalogIndex::get`] but absence is an [`Error::UnknownEntity`]
    pub fn require(&self, id: &str) -> Result<&'a Entity> {
        self.get(id)
            .ok_or_else(|| Error::UnknownEntity(id.to_string()))
    }

    /// Position of the entity in catalog order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).map(|(position, _)| *position)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Every id that appears more than once, sorted
pub fn duplicate_ids(entities: &[Entity]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for entity in entities {
        if !seen.insert(entity.id.as_str()) {
            duplicates.insert(entity.id.clone());
        }
    }
    duplicates.into_iter().collect()
}

/// Reason an id cannot be used in a slug, if any
pub fn check_id(id: &str) -> Option<String> {
    if id.is_empty() {
        return Some("id is empty".to_string());
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Some(format!(
            "id '{}' may only contain lowercase ASCII letters, digits and '-'",
            id
        ));
    }
    if id.starts_with('-') || id.ends_with('-') {
        return Some(format!("id '{}' may not start or end with '-'", id));
    }
    // Either would let two different id pairs produce the same slug
    if id.contains(SLUG_SEPARATOR) {
        return Some(format!(
            "id '{}' contains the slug separator '{}'",
            id, SLUG_SEPARATOR
        ));
    }
    if id.ends_with(SLUG_SEPARATOR.trim_end_matches('-')) {
        return Some(format!(
            "id '{}' may not end with '{}'",
            id,
            SLUG_SEPARATOR.trim_end_matches('-')
        ));
    }
    None
}

/// Reasons the entity's positional list attributes are too short
pub fn check_lists(entity: &Entity) -> Vec<String> {
    [
        ("strengths", entity.strengths.len()),
        ("features", entity.features.len()),
        ("bestFor", entity.best_for.len()),
    ]
    .into_iter()
    .filter(|(_, len)| *len < MIN_LIST_LEN)
    .map(|(field, len)| {
        format!(
            "'{}' needs at least {} entries, found {}",
            field, MIN_LIST_LEN, len
        )
    })
    .collect()
}
