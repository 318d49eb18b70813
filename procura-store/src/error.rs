//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV reader/writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON import payload was valid JSON but not an array.
    #[error("expected a JSON array of records, found {0}")]
    NotAnArray(&'static str),

    /// A patch produced a record the entity type cannot hold.
    #[error("patch for {id} does not fit the record schema: {source}")]
    Patch {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Unknown export/import format name.
    #[error("unknown format: {0} (expected json or csv)")]
    UnknownFormat(String),

    /// Invalid data.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
