use storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
