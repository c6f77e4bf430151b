use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use openfund_core::{FieldRegistry, Record};

use crate::error::EngineError;

/// A named filter a view can hold active. Each variant is a pure predicate
/// over one record; unknown fields simply never match (registration is
/// validated up front by [`crate::QueryEngine::set_filter`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Case-insensitive containment across a field set. An empty term
    /// matches everything; null/absent fields are skipped, not matched.
    Substring { fields: Vec<String>, term: String },
    /// Case-sensitive equality against the field's rendered value. An empty
    /// filter value is a no-op.
    Exact { field: String, value: String },
    /// Inclusive-lower / exclusive-upper numeric range. `None` means
    /// unbounded on that side. Missing values never satisfy a range.
    NumberRange {
        field: String,
        lower: Option<f64>,
        upper: Option<f64>,
    },
    /// The designated bucket for records whose numeric value is absent.
    Unspecified { field: String },
    /// Date within `[reference - window_days, reference]` inclusive.
    /// Absent or unparsable dates never match.
    DateWindow {
        field: String,
        reference: NaiveDate,
        window_days: u64,
    },
    /// Strict boolean equality; `None` means no constraint.
    Flag { field: String, expected: Option<bool> },
}

impl Filter {
    /// An inert filter carries an unset/empty value and must behave exactly
    /// as if it had never been applied.
    pub fn is_inert(&self) -> bool {
        match self {
            Filter::Substring { term, .. } => term.trim().is_empty(),
            Filter::Exact { value, .. } => value.is_empty(),
            Filter::Flag { expected, .. } => expected.is_none(),
            _ => false,
        }
    }

    /// Field names this filter reads, for up-front registry validation.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Filter::Substring { fields, .. } => fields.iter().map(String::as_str).collect(),
            Filter::Exact { field, .. }
            | Filter::NumberRange { field, .. }
            | Filter::Unspecified { field }
            | Filter::DateWindow { field, .. }
            | Filter::Flag { field, .. } => vec![field],
        }
    }

    pub fn validate(&self, registry: &FieldRegistry) -> Result<(), EngineError> {
        for field in self.fields() {
            registry.get(field)?;
        }
        Ok(())
    }

    pub fn matches(&self, registry: &FieldRegistry, record: &Record) -> bool {
        if self.is_inert() {
            return true;
        }
        match self {
            Filter::Substring { fields, term } => {
                let needle = term.trim().to_lowercase();
                fields.iter().any(|field| {
                    field_value(registry, record, field)
                        .map(|v| v.display().to_lowercase().contains(&needle))
                        .unwrap_or(false)
                })
            }
            Filter::Exact { field, value } => field_value(registry, record, field)
                .map(|v| v.display() == *value)
                .unwrap_or(false),
            Filter::NumberRange {
                field,
                lower,
                upper,
            } => match field_value(registry, record, field).and_then(|v| v.as_number()) {
                Some(v) => {
                    lower.map(|lo| v >= lo).unwrap_or(true) && upper.map(|hi| v < hi).unwrap_or(true)
                }
                None => false,
            },
            Filter::Unspecified { field } => field_value(registry, record, field)
                .and_then(|v| v.as_number())
                .is_none(),
            Filter::DateWindow {
                field,
                reference,
                window_days,
            } => match field_value(registry, record, field).and_then(|v| v.as_date()) {
                Some(date) => {
                    let start = reference
                        .checked_sub_days(Days::new(*window_days))
                        .unwrap_or(NaiveDate::MIN);
                    date >= start && date <= *reference
                }
                None => false,
            },
            Filter::Flag { field, expected } => match expected {
                Some(want) => field_value(registry, record, field)
                    .and_then(|v| v.as_boolean())
                    .map(|b| b == *want)
                    .unwrap_or(false),
                None => true,
            },
        }
    }
}

fn field_value(
    registry: &FieldRegistry,
    record: &Record,
    field: &str,
) -> Option<openfund_core::FieldValue> {
    registry.get(field).ok().and_then(|d| d.value(record))
}

/// The six standard funding-amount buckets plus the unspecified bucket.
/// Every numeric value falls in exactly one of the bounded buckets; missing
/// values fall only in `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountBucket {
    Under100k,
    From100kTo500k,
    From500kTo1m,
    From1mTo5m,
    From5mTo10m,
    Over10m,
    Unspecified,
}

impl AmountBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under100k => "under-100k",
            Self::From100kTo500k => "100k-500k",
            Self::From500kTo1m => "500k-1m",
            Self::From1mTo5m => "1m-5m",
            Self::From5mTo10m => "5m-10m",
            Self::Over10m => "over-10m",
            Self::Unspecified => "unspecified",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|b| b.as_str() == s)
    }

    pub fn all() -> [AmountBucket; 7] {
        [
            Self::Under100k,
            Self::From100kTo500k,
            Self::From500kTo1m,
            Self::From1mTo5m,
            Self::From5mTo10m,
            Self::Over10m,
            Self::Unspecified,
        ]
    }

    /// `(lower inclusive, upper exclusive)`; `None` for the unspecified bucket.
    pub fn bounds(&self) -> Option<(Option<f64>, Option<f64>)> {
        match self {
            Self::Under100k => Some((None, Some(100_000.0))),
            Self::From100kTo500k => Some((Some(100_000.0), Some(500_000.0))),
            Self::From500kTo1m => Some((Some(500_000.0), Some(1_000_000.0))),
            Self::From1mTo5m => Some((Some(1_000_000.0), Some(5_000_000.0))),
            Self::From5mTo10m => Some((Some(5_000_000.0), Some(10_000_000.0))),
            Self::Over10m => Some((Some(10_000_000.0), None)),
            Self::Unspecified => None,
        }
    }

    /// The filter this bucket stands for over the given numeric field.
    pub fn filter(&self, field: &str) -> Filter {
        match self.bounds() {
            Some((lower, upper)) => Filter::NumberRange {
                field: field.to_string(),
                lower,
                upper,
            },
            None => Filter::Unspecified {
                field: field.to_string(),
            },
        }
    }
}
