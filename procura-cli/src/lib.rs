//! Procura command-line front end.
//!
//! Loads an exported collection (JSON or CSV) into an in-memory
//! [`procura_store::EntityStore`] and runs one query or report against it.
//! Nothing is written back unless `convert` is given an output path.

pub mod commands;
pub mod config;

pub use config::{ConfigError, ConfigLoad, EntityTypeConfig, ProcuraConfig};
