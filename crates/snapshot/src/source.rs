use std::fs;
use std::path::PathBuf;

use crate::error::SnapshotError;

/// One tier of the snapshot fallback chain. A session's loader typically
/// stacks a generated file, an optional caller-supplied live source, and an
/// embedded sample fixture; transport concerns live behind this trait.
pub trait SnapshotSource: Send + Sync {
    /// Human-readable identity for load-failure reporting.
    fn describe(&self) -> String;

    /// Produce the raw snapshot text (JSON or CSV).
    fn fetch(&self) -> Result<String, SnapshotError>;
}

/// Reads a pre-generated snapshot file from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn fetch(&self) -> Result<String, SnapshotError> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// An embedded sample snapshot, the last tier of every fallback chain.
pub struct FixtureSource {
    name: &'static str,
    body: &'static str,
}

impl FixtureSource {
    pub const fn new(name: &'static str, body: &'static str) -> Self {
        Self { name, body }
    }
}

impl SnapshotSource for FixtureSource {
    fn describe(&self) -> String {
        format!("fixture:{}", self.name)
    }

    fn fetch(&self) -> Result<String, SnapshotError> {
        Ok(self.body.to_string())
    }
}
