use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use openfund_core::{Collection, Record};

use crate::error::EngineError;
use crate::predicate::Filter;

/// Distinct non-empty values of a field, lexicographically sorted. Used to
/// populate filter option lists.
pub fn distinct_sorted_values(
    collection: &Collection,
    field: &str,
) -> Result<Vec<String>, EngineError> {
    let descriptor = collection.registry().get(field)?;
    let mut values: Vec<String> = collection
        .records()
        .iter()
        .filter_map(|record| descriptor.value(record))
        .map(|v| v.display())
        .filter(|s| !s.is_empty())
        .collect();
    values.sort();
    values.dedup();
    Ok(values)
}

/// Count records, optionally restricted to those matching a filter.
pub fn count(collection: &Collection, filter: Option<&Filter>) -> usize {
    collection
        .records()
        .iter()
        .filter(|record| passes(collection, filter, record))
        .count()
}

/// Sum a numeric field across records, treating missing values as 0.
pub fn sum(
    collection: &Collection,
    field: &str,
    filter: Option<&Filter>,
) -> Result<f64, EngineError> {
    let descriptor = collection.registry().get(field)?;
    Ok(collection
        .records()
        .iter()
        .filter(|record| passes(collection, filter, record))
        .map(|record| {
            descriptor
                .value(record)
                .and_then(|v| v.as_number())
                .unwrap_or(0.0)
        })
        .sum())
}

fn passes(collection: &Collection, filter: Option<&Filter>, record: &Record) -> bool {
    filter
        .map(|f| f.matches(collection.registry(), record))
        .unwrap_or(true)
}

/// Dashboard summary over a collection snapshot: total count, distinct-value
/// counts per chosen field, sums per chosen numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub count: usize,
    pub distinct_counts: BTreeMap<String, usize>,
    pub sums: BTreeMap<String, f64>,
}

impl AggregateStats {
    pub fn compute(
        collection: &Collection,
        distinct_fields: &[&str],
        sum_fields: &[&str],
    ) -> Result<Self, EngineError> {
        let mut distinct_counts = BTreeMap::new();
        for field in distinct_fields {
            let values = distinct_sorted_values(collection, field)?;
            distinct_counts.insert(field.to_string(), values.len());
        }

        let mut sums = BTreeMap::new();
        for field in sum_fields {
            sums.insert(field.to_string(), sum(collection, field, None)?);
        }

        Ok(Self {
            count: collection.len(),
            distinct_counts,
            sums,
        })
    }
}
