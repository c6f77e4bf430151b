use openfund_core::{Catalog, Collection, CollectionId, FieldValue, Record};
use openfund_snapshot::{SnapshotLoader, schema};

/// Build a grant record from the fields most tests care about. Pass `None`
/// to leave award_ceiling or close_date absent.
pub fn grant(
    id: &str,
    title: &str,
    agency: &str,
    status: &str,
    award_ceiling: Option<f64>,
    close_date: Option<&str>,
) -> Record {
    let mut fields = vec![
        ("title", FieldValue::Text(title.to_string())),
        ("agency", FieldValue::Text(agency.to_string())),
        ("status", FieldValue::Text(status.to_string())),
    ];
    if let Some(ceiling) = award_ceiling {
        fields.push(("award_ceiling", FieldValue::Number(ceiling)));
    }
    if let Some(date) = close_date {
        let parsed = openfund_core::parse_date(date).expect("test date must parse");
        fields.push(("close_date", FieldValue::Date(parsed)));
    }
    Record::new(id, fields)
}

/// A grants collection typed by the production grants registry.
pub fn grants_collection(records: Vec<Record>) -> Collection {
    Collection::new(CollectionId::Grants, schema::grants_registry(), records)
        .expect("test records must satisfy the id invariant")
}

/// Every collection loaded from its embedded sample fixture, exercising the
/// same decode path production uses.
pub fn fixture_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for id in CollectionId::all() {
        let collection = SnapshotLoader::new()
            .tier(schema::fixture_for(id))
            .load(id)
            .expect("sample fixtures always load");
        catalog.insert(collection);
    }
    catalog
}
