use thiserror::Error;

/// Errors raised by the plumbing around the boundary: readers, writers and sinks.
///
/// Domain failures live in [`crate::domain::failure::Failure`]; this type never
/// reaches a client response.
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[cfg(feature = "sink-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDbError(#[from] rocksdb::Error),
    #[error("Sink error: {0}")]
    SinkError(String),
}

pub type Result<T> = std::result::Result<T, GuardError>;
