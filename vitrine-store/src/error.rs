//! Document store error types

use thiserror::Error;

/// Document store error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// Remote store unreachable (network/timeout)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Document does not exist
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Pagination cursor no longer resolves to a document
    #[error("Invalid cursor: {0}")]
    CursorInvalid(String),

    /// A batched write was rejected; no operation was applied
    #[error("Batch rejected: {0}")]
    BatchRejected(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for document store operations
pub type StoreResult<T> = Result<T, StoreError>;
