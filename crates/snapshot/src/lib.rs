pub mod decode;
pub mod error;
pub mod schema;
pub mod source;

pub use error::SnapshotError;
pub use source::{FileSource, FixtureSource, SnapshotSource};

use std::path::Path;

use tracing::{error, warn};

use openfund_core::{Catalog, Collection, CollectionId};

/// Ordered fallback chain for one collection: each tier is attempted only
/// after the prior tier fails; the first snapshot that fetches and decodes
/// wins. No tier succeeding is a visible load failure, never a crash.
pub struct SnapshotLoader {
    tiers: Vec<Box<dyn SnapshotSource>>,
}

impl SnapshotLoader {
    pub fn new() -> Self {
        Self { tiers: Vec::new() }
    }

    /// The standard chain: generated file under `dir`, then the embedded
    /// sample fixture. Callers with a live endpoint splice their own
    /// [`SnapshotSource`] between the two.
    pub fn standard(dir: &Path, id: CollectionId) -> Self {
        Self::new()
            .tier(FileSource::new(dir.join(format!("{id}.json"))))
            .tier(schema::fixture_for(id))
    }

    pub fn tier(mut self, source: impl SnapshotSource + 'static) -> Self {
        self.tiers.push(Box::new(source));
        self
    }

    pub fn load(&self, id: CollectionId) -> Result<Collection, SnapshotError> {
        let registry = schema::registry_for(id);

        for source in &self.tiers {
            let text = match source.fetch() {
                Ok(text) => text,
                Err(err) => {
                    warn!(collection = %id, source = source.describe(), %err, "snapshot tier failed");
                    continue;
                }
            };

            let decoded = if text.trim_start().starts_with(['[', '{']) {
                decode::decode_json(&registry, &text)
            } else {
                decode::decode_csv(&registry, &text)
            };
            match decoded {
                Ok(records) => {
                    return Ok(Collection::new(id, registry, records)?);
                }
                Err(err) => {
                    warn!(collection = %id, source = source.describe(), %err, "snapshot tier undecodable");
                }
            }
        }

        error!(collection = %id, attempts = self.tiers.len(), "all snapshot tiers failed");
        Err(SnapshotError::AllTiersFailed {
            collection: id.as_str().to_string(),
            attempts: self.tiers.len(),
        })
    }
}

impl Default for SnapshotLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load every collection with the standard chain into one catalog.
/// Individual load failures leave that collection out rather than failing
/// the whole session.
pub fn load_catalog(dir: &Path) -> Catalog {
    let mut catalog = Catalog::new();
    for id in CollectionId::all() {
        match SnapshotLoader::standard(dir, id).load(id) {
            Ok(collection) => catalog.insert(collection),
            Err(err) => warn!(collection = %id, %err, "collection unavailable this session"),
        }
    }
    catalog
}
