use serde::{Deserialize, Serialize};

use openfund_core::{Catalog, CollectionId};

use crate::error::EngineError;

/// A requested view switch plus the filter to pre-apply, produced by
/// cross-reference resolution and applied by [`crate::Session`]. The engine
/// never touches presentation; it only hands back this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub target: CollectionId,
    pub field: String,
    pub value: String,
    /// How many records matched. Always ≥ 1; the applied filter, not the
    /// resolver, narrows multiple destinations down.
    pub match_count: usize,
}

/// Locate records in another collection by case-insensitive exact equality
/// on a designated key field (e.g. jump from an award to its company by
/// name). Zero matches is a user-visible `NoMatch`, not a silent no-op.
pub fn resolve(
    catalog: &Catalog,
    target: CollectionId,
    field: &str,
    value: &str,
) -> Result<NavigationIntent, EngineError> {
    let collection = catalog.get(target)?;
    let descriptor = collection.registry().get(field)?;

    let wanted = value.to_lowercase();
    let match_count = collection
        .records()
        .iter()
        .filter(|record| {
            descriptor
                .value(record)
                .map(|v| v.display().to_lowercase() == wanted)
                .unwrap_or(false)
        })
        .count();

    if match_count == 0 {
        return Err(EngineError::NoMatch {
            collection: target,
            field: field.to_string(),
            value: value.to_string(),
        });
    }

    Ok(NavigationIntent {
        target,
        field: field.to_string(),
        value: value.to_string(),
        match_count,
    })
}
