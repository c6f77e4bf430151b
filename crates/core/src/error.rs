use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
