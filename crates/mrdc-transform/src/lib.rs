//! Data cleaning for the retail data ETL.
//!
//! - **cleaners**: one cleaning pipeline per entity plus a registry
//! - **normalization**: dates, weights, addresses and dirty numbers
//! - **validation**: allow-list filtering with drop counts
//! - **index**: row index casting, sorting and resetting
//! - **frame**: entity-tagged frames passed between stages
//! - **data_utils**: DataFrame value extraction and column replacement

pub mod cleaners;
pub mod data_utils;
pub mod error;
pub mod frame;
pub mod index;
pub mod normalization;
pub mod validation;

pub use cleaners::{CleanerRegistry, EntityCleaner, clean_entity};
pub use error::{DateFormatError, Result, TransformError, WeightError};
pub use frame::EntityFrame;
pub use validation::{count_invalid, drop_invalid};
