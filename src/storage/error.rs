use super::types::{ContainerRef, ETag, PartitionKey};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Container not found: {0}")]
    ContainerNotFound(ContainerRef),

    #[error("Document not found: id={id}, partition_key={partition_key}")]
    NotFound {
        id: String,
        partition_key: PartitionKey,
    },

    #[error("Document already exists: id={id}, partition_key={partition_key}")]
    Conflict {
        id: String,
        partition_key: PartitionKey,
    },

    #[error("Precondition failed for document {id}: expected etag {expected}, found {actual}")]
    PreconditionFailed {
        id: String,
        expected: ETag,
        actual: ETag,
    },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid continuation token: {0}")]
    InvalidContinuation(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
