//! Shared model types for the retail data ETL.
//!
//! - **entity**: the six entity kinds and their target tables
//! - **options**: per-entity allow-lists used to drop invalid rows
//! - **error**: configuration errors

pub mod entity;
pub mod error;
pub mod options;

pub use entity::EntityKind;
pub use error::{ConfigError, Result};
pub use options::{CleaningOptions, ValidEntries};
