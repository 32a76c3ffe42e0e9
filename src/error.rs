use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Render error: {0}")]
    RenderError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, RpaError>;
