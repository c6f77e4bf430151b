use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field::FieldValue;
use crate::record::Record;

/// Declared type of a logical field. Drives which predicates apply to it and
/// how the field sorts and coerces at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Boolean,
    /// Controlled vocabulary; exact matches are case-sensitive.
    Enum,
    TextList,
}

/// Extracts a logical field's value from a record. Returns `None` for absent
/// or null values so every predicate sees one notion of "missing".
pub type Accessor = Box<dyn Fn(&Record) -> Option<FieldValue> + Send + Sync>;

pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    accessor: Accessor,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn value(&self, record: &Record) -> Option<FieldValue> {
        (self.accessor)(record).filter(|v| !v.is_null())
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Per-collection mapping of logical field names to typed accessors.
/// Populated once at setup, read-only afterwards.
pub struct FieldRegistry {
    fields: BTreeMap<String, FieldDescriptor>,
    searchable: Vec<String>,
    id_field: String,
}

impl FieldRegistry {
    pub fn new(id_field: &str) -> Self {
        Self {
            fields: BTreeMap::new(),
            searchable: Vec::new(),
            id_field: id_field.to_string(),
        }
    }

    /// Register a field backed by the record's own key of the same name.
    pub fn register(&mut self, name: &str, kind: FieldKind) -> &mut Self {
        let key = name.to_string();
        self.register_computed(
            name,
            kind,
            Box::new(move |record: &Record| record.value(&key).cloned()),
        )
    }

    /// Register a field with a custom accessor (derived or renamed values).
    pub fn register_computed(&mut self, name: &str, kind: FieldKind, accessor: Accessor) -> &mut Self {
        self.fields.insert(
            name.to_string(),
            FieldDescriptor {
                name: name.to_string(),
                kind,
                accessor,
            },
        );
        self
    }

    /// Declare which fields the substring search scans, in order.
    pub fn set_searchable(&mut self, fields: &[&str]) -> &mut Self {
        self.searchable = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn get(&self, name: &str) -> Result<&FieldDescriptor, CoreError> {
        self.fields
            .get(name)
            .ok_or_else(|| CoreError::UnknownField(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    pub fn searchable(&self) -> &[String] {
        &self.searchable
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Resolve a field on a record, failing on unregistered names.
    pub fn value_of(&self, record: &Record, field: &str) -> Result<Option<FieldValue>, CoreError> {
        Ok(self.get(field)?.value(record))
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("searchable", &self.searchable)
            .field("id_field", &self.id_field)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record::new(
            "g-1",
            vec![
                ("title", FieldValue::Text("Harbor Dredging".into())),
                ("award_ceiling", FieldValue::Number(250_000.0)),
                ("close_date", FieldValue::Null),
            ],
        )
    }

    #[test]
    fn keyed_accessor_reads_record_field() {
        let mut registry = FieldRegistry::new("id");
        registry.register("title", FieldKind::Text);

        let record = sample_record();
        let value = registry.value_of(&record, "title").unwrap();
        assert_eq!(value, Some(FieldValue::Text("Harbor Dredging".into())));
    }

    #[test]
    fn null_and_absent_both_resolve_to_none() {
        let mut registry = FieldRegistry::new("id");
        registry.register("close_date", FieldKind::Date);
        registry.register("posted_date", FieldKind::Date);

        let record = sample_record();
        assert_eq!(registry.value_of(&record, "close_date").unwrap(), None);
        assert_eq!(registry.value_of(&record, "posted_date").unwrap(), None);
    }

    #[test]
    fn unregistered_field_fails() {
        let registry = FieldRegistry::new("id");
        let record = sample_record();
        let err = registry.value_of(&record, "nope").unwrap_err();
        assert!(matches!(err, CoreError::UnknownField(name) if name == "nope"));
    }

    #[test]
    fn computed_accessor_derives_values() {
        let mut registry = FieldRegistry::new("id");
        registry.register_computed(
            "has_ceiling",
            FieldKind::Boolean,
            Box::new(|record: &Record| {
                Some(FieldValue::Boolean(
                    record.value("award_ceiling").is_some(),
                ))
            }),
        );

        let record = sample_record();
        assert_eq!(
            registry.value_of(&record, "has_ceiling").unwrap(),
            Some(FieldValue::Boolean(true))
        );
    }
}
