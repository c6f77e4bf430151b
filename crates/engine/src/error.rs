use openfund_core::{CollectionId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("no {collection} record where {field} = {value:?}")]
    NoMatch {
        collection: CollectionId,
        field: String,
        value: String,
    },
}
