use thiserror::Error;

/// Errors from the remote stock/product lookup.
///
/// The cart store treats every variant uniformly (operation aborted, generic
/// notification); the variants exist for logging and for hosts that call the
/// stock service directly.
#[derive(Debug, Error)]
pub enum StockError {
    #[error("catalog request failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },

    #[error("catalog returned unexpected status: {status}")]
    UnexpectedStatus { status: u16 },
}

/// Errors from the durable blob store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid storage key: {key}")]
    InvalidKey { key: String },
}

/// Result type alias for stock service operations
pub type StockResult<T> = Result<T, StockError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
