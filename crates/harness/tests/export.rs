use std::sync::Arc;

use openfund_core::CollectionId;
use openfund_engine::{EngineError, Filter, QueryEngine, SortDirection, to_csv};
use openfund_harness::{fixture_catalog, grant, grants_collection};
use openfund_snapshot::schema;
use pretty_assertions::assert_eq;

// ============================================================================
// Shape
// ============================================================================

#[test]
fn export_carries_the_fixed_header_row() -> Result<(), EngineError> {
    let catalog = fixture_catalog();
    let collection = catalog.get(CollectionId::Challenges)?;
    let engine = QueryEngine::new(collection.clone());

    let csv = to_csv(
        collection.registry(),
        &engine.matching_records(),
        schema::csv_columns(CollectionId::Challenges),
    )?;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("ID,Title,Agency,Status,Prize Total,Submission End,URL")
    );
    assert_eq!(lines.count(), engine.result().total());
    Ok(())
}

#[test]
fn fields_containing_delimiters_are_quoted() -> Result<(), EngineError> {
    let records = vec![grant(
        "g-1",
        "Ports, Rail and \"Freight\"",
        "DOT",
        "Open",
        Some(2_000_000.0),
        None,
    )];
    let collection = Arc::new(grants_collection(records));
    let engine = QueryEngine::new(collection.clone());

    let csv = to_csv(
        collection.registry(),
        &engine.matching_records(),
        schema::csv_columns(CollectionId::Grants),
    )?;
    let row = csv.lines().nth(1).unwrap_or_default();
    assert!(row.contains(r#""Ports, Rail and ""Freight""""#));
    // Absent close_date renders as an empty cell, not a literal null.
    assert!(row.ends_with(','));
    Ok(())
}

// ============================================================================
// Scope
// ============================================================================

#[test]
fn export_covers_all_matches_regardless_of_page() -> Result<(), EngineError> {
    let catalog = fixture_catalog();
    let collection = catalog.get(CollectionId::Grants)?;
    let mut engine = QueryEngine::with_page_size(collection.clone(), 1);
    assert!(engine.result().page_count() > 1);

    let columns = schema::csv_columns(CollectionId::Grants);
    let first = to_csv(collection.registry(), &engine.matching_records(), columns)?;
    engine.set_page(engine.result().page_count());
    let last = to_csv(collection.registry(), &engine.matching_records(), columns)?;

    assert_eq!(first, last);
    assert_eq!(first.lines().count(), engine.result().total() + 1);
    Ok(())
}

#[test]
fn export_reflects_the_current_query_state() -> Result<(), EngineError> {
    let catalog = fixture_catalog();
    let collection = catalog.get(CollectionId::Grants)?;
    let mut engine = QueryEngine::new(collection.clone());
    engine.set_filter(
        "status",
        Filter::Exact { field: "status".into(), value: "Open".into() },
    )?;
    engine.set_sort("award_ceiling", SortDirection::Desc)?;

    let csv = to_csv(
        collection.registry(),
        &engine.matching_records(),
        schema::csv_columns(CollectionId::Grants),
    )?;
    let rows: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("GRANT-2025-0002"), "highest ceiling first");
    assert!(rows[1].starts_with("GRANT-2025-0001"));
    Ok(())
}

#[test]
fn unregistered_export_column_is_rejected() {
    let collection = Arc::new(grants_collection(vec![grant(
        "g-1",
        "Watershed Restoration",
        "EPA",
        "Open",
        None,
        None,
    )]));
    let engine = QueryEngine::new(collection.clone());

    const BAD: &[openfund_engine::CsvColumn] =
        &[openfund_engine::CsvColumn::new("Prize", "prize_total")];
    let err = to_csv(collection.registry(), &engine.matching_records(), BAD);
    assert!(err.is_err());
}
