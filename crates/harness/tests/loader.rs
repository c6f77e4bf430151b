use std::fs;

use openfund_core::CollectionId;
use openfund_snapshot::{FileSource, SnapshotError, SnapshotLoader, load_catalog, schema};
use pretty_assertions::assert_eq;

type TestResult = Result<(), Box<dyn std::error::Error>>;

// ============================================================================
// Tier precedence
// ============================================================================

#[test]
fn file_tier_beats_the_embedded_fixture() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("grants.json"),
        r#"[{"id": "FILE-1", "title": "From Disk", "agency": "GSA", "status": "Open"}]"#,
    )?;

    let collection = SnapshotLoader::standard(dir.path(), CollectionId::Grants)
        .load(CollectionId::Grants)?;
    assert_eq!(collection.len(), 1);
    assert!(collection.record_by_id("FILE-1").is_some());
    Ok(())
}

#[test]
fn missing_file_falls_back_to_the_fixture() -> TestResult {
    let dir = tempfile::tempdir()?;
    let collection = SnapshotLoader::standard(dir.path(), CollectionId::Grants)
        .load(CollectionId::Grants)?;
    assert_eq!(collection.len(), 3);
    assert!(collection.record_by_id("GRANT-2025-0001").is_some());
    Ok(())
}

#[test]
fn undecodable_file_falls_back_to_the_fixture() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("grants.json"), "[{not json at all")?;

    let collection = SnapshotLoader::standard(dir.path(), CollectionId::Grants)
        .load(CollectionId::Grants)?;
    assert!(collection.record_by_id("GRANT-2025-0001").is_some());
    Ok(())
}

#[test]
fn custom_tier_splices_between_file_and_fixture() -> TestResult {
    let dir = tempfile::tempdir()?;
    let spliced = dir.path().join("live-grants.json");
    fs::write(
        &spliced,
        r#"[{"id": "LIVE-1", "title": "From Endpoint", "agency": "GSA", "status": "Open"}]"#,
    )?;

    let collection = SnapshotLoader::new()
        .tier(FileSource::new(dir.path().join("grants.json")))
        .tier(FileSource::new(spliced))
        .tier(schema::fixture_for(CollectionId::Grants))
        .load(CollectionId::Grants)?;
    assert!(collection.record_by_id("LIVE-1").is_some());
    Ok(())
}

#[test]
fn exhausted_chain_reports_every_attempt() -> TestResult {
    let dir = tempfile::tempdir()?;
    let err = SnapshotLoader::new()
        .tier(FileSource::new(dir.path().join("absent.json")))
        .tier(FileSource::new(dir.path().join("also-absent.json")))
        .load(CollectionId::Grants)
        .unwrap_err();

    match err {
        SnapshotError::AllTiersFailed { collection, attempts } => {
            assert_eq!(collection, "grants");
            assert_eq!(attempts, 2);
        }
        other => panic!("expected AllTiersFailed, got {other}"),
    }
    Ok(())
}

// ============================================================================
// Formats
// ============================================================================

#[test]
fn csv_snapshots_decode_by_sniffing() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("grants.csv");
    fs::write(
        &path,
        "id,title,agency,status,award_ceiling,close_date\n\
         CSV-1,\"Ports, Rail and Freight\",DOT,Open,2000000,2025-11-30\n\
         CSV-2,Arts Partnership,NEA,Open,,\n",
    )?;

    let collection = SnapshotLoader::new()
        .tier(FileSource::new(path))
        .load(CollectionId::Grants)?;
    assert_eq!(collection.len(), 2);

    let freight = collection
        .record_by_id("CSV-1")
        .ok_or("CSV-1 missing")?;
    assert_eq!(
        freight.value("title").map(|v| v.display()),
        Some("Ports, Rail and Freight".to_string())
    );
    assert_eq!(
        freight.value("award_ceiling").and_then(|v| v.as_number()),
        Some(2_000_000.0)
    );

    // Blank CSV cells decode as absent, same as omitted JSON keys.
    let arts = collection.record_by_id("CSV-2").ok_or("CSV-2 missing")?;
    assert!(arts.value("award_ceiling").is_none());
    Ok(())
}

// ============================================================================
// Catalog assembly
// ============================================================================

#[test]
fn empty_directory_still_yields_a_full_catalog() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = load_catalog(dir.path());
    assert_eq!(catalog.len(), CollectionId::all().len());
    for id in CollectionId::all() {
        assert!(!catalog.get(id)?.is_empty());
    }
    Ok(())
}

#[test]
fn one_bad_collection_does_not_sink_the_rest() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("grants.json"), "{\"not\": \"an array\"}")?;

    // The broken grants file is skipped in favor of the fixture tier, and the
    // other five collections are unaffected.
    let catalog = load_catalog(dir.path());
    assert_eq!(catalog.len(), 6);
    assert!(catalog.get(CollectionId::Grants)?.record_by_id("GRANT-2025-0001").is_some());
    Ok(())
}
