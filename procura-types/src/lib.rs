//! Core type definitions for Procura.
//!
//! This crate defines the fundamental, schema-agnostic types used by every
//! entity store:
//! - Entity identifiers, namespaced by entity type
//! - ISO-8601 timestamps with a monotonic tick
//!
//! Record shapes (suppliers, deliveries, inventory, ...) belong in
//! `procura-model`, not here.

mod ids;
mod timestamp;

pub use ids::EntityId;
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid entity id: {0}")]
    InvalidId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),
}
