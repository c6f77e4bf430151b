use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldValue;

/// One row of a collection: a stable identifier plus a flat map of field
/// values. The field set varies per collection and any key may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: String,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: &str, fields: Vec<(&str, FieldValue)>) -> Self {
        Self {
            id: id.to_string(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    pub fn from_map(id: String, fields: BTreeMap<String, FieldValue>) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw keyed lookup. Absent keys and stored `Null`s both yield `None`.
    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }
}
