use openfund_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("snapshot source unavailable: {0}")]
    Unavailable(String),

    #[error("malformed snapshot: {0}")]
    Malformed(String),

    #[error("all {attempts} snapshot tier(s) failed for {collection}")]
    AllTiersFailed { collection: String, attempts: usize },
}
