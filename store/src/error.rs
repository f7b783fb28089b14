use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("a token is already stored")]
    AlreadyInitialized,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("stored data is inconsistent: {0}")]
    Corruption(String),

    /// Another writer extended the log since this view was loaded.
    #[error("write conflict: batch starts at seq {found}, stored log has {expected} records")]
    Conflict { expected: u64, found: u64 },
}
