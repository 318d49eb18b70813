//! In-memory entity stores for Procura.
//!
//! One [`EntityStore`] is created per entity type and owned by whichever
//! screen or command needs it; there is no shared registry.
//!
//! # Operations
//!
//! - create / read / update / delete keyed by [`procura_types::EntityId`]
//! - filtered listing ([`Filters`]) and free-text search
//! - JSON and CSV export, and fail-soft import ([`ImportOutcome`])
//!
//! Missing ids are reported through `Option` / `bool`, never as errors.

mod codec;
mod error;
mod filter;
mod outcome;
mod store;

pub use codec::{ExportFormat, display_value};
pub use error::{StoreError, StoreResult};
pub use filter::Filters;
pub use outcome::ImportOutcome;
pub use store::EntityStore;

pub use procura_model::{Document, Entity, Record, SchemaRecord};
