use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use openfund_core::{FieldKind, FieldRegistry, FieldValue, Record, parse_date, parse_number};

use crate::error::SnapshotError;

/// Coerce one raw JSON value to a registered field kind. Uncoercible values
/// degrade to `Null` so a single bad field never rejects the whole record.
pub fn coerce(kind: FieldKind, raw: &Value) -> FieldValue {
    match (kind, raw) {
        (_, Value::Null) => FieldValue::Null,
        (FieldKind::Text | FieldKind::Enum, Value::String(s)) => FieldValue::Text(s.clone()),
        (FieldKind::Text | FieldKind::Enum, Value::Number(n)) => FieldValue::Text(n.to_string()),
        (FieldKind::Number, Value::Number(n)) => {
            n.as_f64().map(FieldValue::Number).unwrap_or(FieldValue::Null)
        }
        (FieldKind::Number, Value::String(s)) => {
            parse_number(s).map(FieldValue::Number).unwrap_or(FieldValue::Null)
        }
        (FieldKind::Date, Value::String(s)) => {
            parse_date(s).map(FieldValue::Date).unwrap_or(FieldValue::Null)
        }
        (FieldKind::Boolean, Value::Bool(b)) => FieldValue::Boolean(*b),
        (FieldKind::Boolean, Value::String(s)) => coerce_boolean_text(s),
        (FieldKind::TextList, Value::Array(items)) => FieldValue::TextList(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        (FieldKind::TextList, Value::String(s)) => coerce_list_text(s),
        _ => FieldValue::Null,
    }
}

/// Coerce a CSV cell (always text) to a registered field kind.
pub fn coerce_text(kind: FieldKind, raw: &str) -> FieldValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldValue::Null;
    }
    match kind {
        FieldKind::Text | FieldKind::Enum => FieldValue::Text(trimmed.to_string()),
        FieldKind::Number => parse_number(trimmed)
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Null),
        FieldKind::Date => parse_date(trimmed)
            .map(FieldValue::Date)
            .unwrap_or(FieldValue::Null),
        FieldKind::Boolean => coerce_boolean_text(trimmed),
        FieldKind::TextList => coerce_list_text(trimmed),
    }
}

fn coerce_boolean_text(raw: &str) -> FieldValue {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => FieldValue::Boolean(true),
        "false" | "no" | "n" | "0" => FieldValue::Boolean(false),
        _ => FieldValue::Null,
    }
}

fn coerce_list_text(raw: &str) -> FieldValue {
    FieldValue::TextList(
        raw.split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Decode a JSON snapshot: a top-level array of flat objects. Registered
/// fields are coerced by kind, unregistered keys are ignored, and records
/// without a usable identifier are dropped with a warning.
pub fn decode_json(registry: &FieldRegistry, text: &str) -> Result<Vec<Record>, SnapshotError> {
    let parsed: Value = serde_json::from_str(text)?;
    let Value::Array(items) = parsed else {
        return Err(SnapshotError::Malformed(
            "expected a top-level JSON array of records".into(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for item in &items {
        let Value::Object(object) = item else {
            warn!("skipping non-object snapshot entry");
            continue;
        };

        let id = object
            .get(registry.id_field())
            .map(|v| match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => String::new(),
            })
            .unwrap_or_default();
        if id.is_empty() {
            warn!(id_field = registry.id_field(), "skipping record without identifier");
            continue;
        }

        let mut fields = BTreeMap::new();
        for descriptor in registry.descriptors() {
            if let Some(raw) = object.get(descriptor.name()) {
                fields.insert(descriptor.name().to_string(), coerce(descriptor.kind(), raw));
            }
        }
        records.push(Record::from_map(id, fields));
    }
    Ok(records)
}

/// Decode a CSV snapshot: header row naming the fields, one record per row.
/// Column order is free; columns that match no registered field are ignored.
pub fn decode_csv(registry: &FieldRegistry, text: &str) -> Result<Vec<Record>, SnapshotError> {
    let mut rows = parse_rows(text).into_iter();
    let header = rows
        .next()
        .ok_or_else(|| SnapshotError::Malformed("empty CSV snapshot".into()))?;

    let id_column = header
        .iter()
        .position(|h| h == registry.id_field())
        .ok_or_else(|| {
            SnapshotError::Malformed(format!("CSV header is missing {:?}", registry.id_field()))
        })?;

    let mut records = Vec::new();
    for row in rows {
        let id = row.get(id_column).map(|s| s.trim()).unwrap_or_default();
        if id.is_empty() {
            warn!(id_field = registry.id_field(), "skipping CSV row without identifier");
            continue;
        }

        let mut fields = BTreeMap::new();
        for (column, cell) in header.iter().zip(row.iter()) {
            if let Ok(descriptor) = registry.get(column) {
                fields.insert(column.clone(), coerce_text(descriptor.kind(), cell));
            }
        }
        records.push(Record::from_map(id.to_string(), fields));
    }
    Ok(records)
}

/// Minimal CSV parser: double-quote escapes and CRLF tolerated, blank lines
/// dropped.
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => row.push(std::mem::take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn registry() -> FieldRegistry {
        let mut registry = FieldRegistry::new("id");
        registry.register("title", FieldKind::Text);
        registry.register("award_ceiling", FieldKind::Number);
        registry.register("close_date", FieldKind::Date);
        registry.register("cost_sharing", FieldKind::Boolean);
        registry.register("eligibility", FieldKind::TextList);
        registry
    }

    #[test]
    fn json_records_coerce_by_kind() {
        let text = r#"[
            {"id": "g-1", "title": "Port Security", "award_ceiling": "$1,500,000",
             "close_date": "2025-09-30", "cost_sharing": "No",
             "eligibility": "States; Nonprofits", "extra": "ignored"}
        ]"#;
        let records = decode_json(&registry(), text).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id(), "g-1");
        assert_eq!(record.value("award_ceiling"), Some(&FieldValue::Number(1_500_000.0)));
        assert_eq!(
            record.value("close_date"),
            Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2025, 9, 30).unwrap()))
        );
        assert_eq!(record.value("cost_sharing"), Some(&FieldValue::Boolean(false)));
        assert_eq!(
            record.value("eligibility"),
            Some(&FieldValue::TextList(vec!["States".into(), "Nonprofits".into()]))
        );
        assert_eq!(record.value("extra"), None);
    }

    #[test]
    fn bad_field_degrades_to_null_not_rejection() {
        let text = r#"[{"id": "g-1", "award_ceiling": "TBD", "close_date": "rolling"}]"#;
        let records = decode_json(&registry(), text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value("award_ceiling"), None);
        assert_eq!(records[0].value("close_date"), None);
    }

    #[test]
    fn records_without_id_are_dropped() {
        let text = r#"[{"title": "No id"}, {"id": "", "title": "Empty id"}, {"id": "g-1"}]"#;
        let records = decode_json(&registry(), text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "g-1");
    }

    #[test]
    fn non_array_envelope_is_malformed() {
        assert!(matches!(
            decode_json(&registry(), r#"{"grants": []}"#),
            Err(SnapshotError::Malformed(_))
        ));
    }

    #[test]
    fn csv_round_trips_quotes_and_kinds() {
        let text = "id,title,award_ceiling,cost_sharing\n\
                    g-1,\"Bridges, and Roads\",250000,yes\n\
                    ,missing id,1,no\n";
        let records = decode_csv(&registry(), text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].value("title"),
            Some(&FieldValue::Text("Bridges, and Roads".into()))
        );
        assert_eq!(records[0].value("award_ceiling"), Some(&FieldValue::Number(250_000.0)));
        assert_eq!(records[0].value("cost_sharing"), Some(&FieldValue::Boolean(true)));
    }

    #[test]
    fn csv_without_id_column_is_malformed() {
        let text = "title\nsomething\n";
        assert!(matches!(
            decode_csv(&registry(), text),
            Err(SnapshotError::Malformed(_))
        ));
    }
}
