/// Error types for storage operations

use thiserror::Error;

/// Storage operation errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Vertex not found
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    /// Edge not found
    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    /// Label not attached to the vertex or edge
    #[error("Label not found: {0}")]
    LabelNotFound(String),

    /// Data key not present on the vertex or edge
    #[error("Data key not found: {0}")]
    DataKeyNotFound(String),

    /// The store has been closed
    #[error("Graph store is closed")]
    Closed,

    /// Graph names namespace storage keys and may not contain ':'
    #[error("Invalid graph name: {0:?}")]
    InvalidGraphName(String),

    /// A storage key could not be decoded
    #[error("Corrupt key: {0}")]
    CorruptKey(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// RocksDB error
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// Generic error
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<String> for StorageError {
    fn from(s: String) -> Self {
        StorageError::Other(s)
    }
}

impl From<&str> for StorageError {
    fn from(s: &str) -> Self {
        StorageError::Other(s.to_string())
    }
}
