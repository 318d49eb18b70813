//! Entity model for Procura.
//!
//! Defines the types every entity store and screen depends on:
//! - [`Entity`]: the stored envelope (id, record fields, created/updated)
//! - [`Record`] / [`SchemaRecord`]: what a store can hold, typed or untyped
//! - [`EntitySchema`]: declares an entity type's fields, required and searchable
//! - [`validate_required`]: the caller-side required-field check
//! - [`procurement`]: typed records for suppliers, orders, deliveries,
//!   inventory and planning, with their derived calculations

mod entity;
mod schema;
mod validation;

pub mod procurement;

pub use entity::{Document, Entity, RESERVED_FIELDS, Record, SchemaRecord, strip_reserved};
pub use schema::{EntitySchema, FieldSpec, FieldType};
pub use validation::{ValidationReport, is_truthy, validate_required};

pub use procura_types::{EntityId, Timestamp};
