use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CoreError;
use crate::record::Record;
use crate::registry::FieldRegistry;

/// The six record collections the application serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CollectionId {
    Grants,
    Challenges,
    SbirAwards,
    SbirCompanies,
    SbirSolicitations,
    Nofas,
}

impl CollectionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grants => "grants",
            Self::Challenges => "challenges",
            Self::SbirAwards => "sbir_awards",
            Self::SbirCompanies => "sbir_companies",
            Self::SbirSolicitations => "sbir_solicitations",
            Self::Nofas => "nofas",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "grants" => Ok(Self::Grants),
            "challenges" => Ok(Self::Challenges),
            "sbir_awards" => Ok(Self::SbirAwards),
            "sbir_companies" => Ok(Self::SbirCompanies),
            "sbir_solicitations" => Ok(Self::SbirSolicitations),
            "nofas" => Ok(Self::Nofas),
            _ => Err(CoreError::UnknownCollection(s.to_string())),
        }
    }

    pub fn all() -> [CollectionId; 6] {
        [
            Self::Grants,
            Self::Challenges,
            Self::SbirAwards,
            Self::SbirCompanies,
            Self::SbirSolicitations,
            Self::Nofas,
        ]
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable snapshot of records plus the field registry that types them.
/// Loaded once per view activation; only read afterwards.
pub struct Collection {
    id: CollectionId,
    registry: FieldRegistry,
    records: Vec<Record>,
}

impl Collection {
    /// Build a collection, enforcing the identifier invariant: records with
    /// empty ids are rejected, later duplicates of an id are dropped.
    pub fn new(
        id: CollectionId,
        registry: FieldRegistry,
        records: Vec<Record>,
    ) -> Result<Self, CoreError> {
        let mut seen = BTreeSet::new();
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            if record.id().is_empty() {
                return Err(CoreError::InvalidData(format!(
                    "record without identifier in collection {id}"
                )));
            }
            if !seen.insert(record.id().to_string()) {
                warn!(collection = %id, record_id = record.id(), "dropping duplicate record id");
                continue;
            }
            kept.push(record);
        }
        Ok(Self {
            id,
            registry,
            records: kept,
        })
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn record_by_id(&self, record_id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == record_id)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("id", &self.id)
            .field("records", &self.records.len())
            .finish()
    }
}

/// The set of loaded collections for one session. Collections are shared
/// read-only between query engines and the cross-reference resolver.
#[derive(Debug, Default)]
pub struct Catalog {
    collections: BTreeMap<CollectionId, Arc<Collection>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, collection: Collection) {
        self.collections
            .insert(collection.id(), Arc::new(collection));
    }

    pub fn get(&self, id: CollectionId) -> Result<&Arc<Collection>, CoreError> {
        self.collections
            .get(&id)
            .ok_or_else(|| CoreError::UnknownCollection(id.as_str().to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = CollectionId> + '_ {
        self.collections.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;
    use crate::registry::FieldKind;

    fn registry() -> FieldRegistry {
        let mut registry = FieldRegistry::new("id");
        registry.register("title", FieldKind::Text);
        registry
    }

    #[test]
    fn duplicate_ids_keep_first_record() {
        let records = vec![
            Record::new("a", vec![("title", FieldValue::Text("first".into()))]),
            Record::new("a", vec![("title", FieldValue::Text("second".into()))]),
            Record::new("b", vec![]),
        ];
        let collection = Collection::new(CollectionId::Grants, registry(), records).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection.record_by_id("a").unwrap().value("title"),
            Some(&FieldValue::Text("first".into()))
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        let records = vec![Record::new("", vec![])];
        let err = Collection::new(CollectionId::Grants, registry(), records).unwrap_err();
        assert!(matches!(err, CoreError::InvalidData(_)));
    }

    #[test]
    fn catalog_lookup_fails_on_missing_collection() {
        let catalog = Catalog::new();
        let err = catalog.get(CollectionId::Nofas).unwrap_err();
        assert!(matches!(err, CoreError::UnknownCollection(_)));
    }

    #[test]
    fn collection_id_round_trips_through_str() {
        for id in CollectionId::all() {
            assert_eq!(CollectionId::parse(id.as_str()).unwrap(), id);
        }
        assert!(CollectionId::parse("bogus").is_err());
    }
}
