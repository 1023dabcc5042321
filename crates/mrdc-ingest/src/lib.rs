//! Extraction for the retail data ETL.
//!
//! - **source**: the [`Source`] trait and [`SourceSpec`] configuration
//! - **csv**: CSV files read with every column as text
//! - **json**: JSON record arrays and column-oriented documents
//! - **api**: the store details REST API
//! - **frame_builder**: JSON records to string DataFrames

pub mod api;
pub mod csv;
pub mod error;
pub mod frame_builder;
pub mod json;
pub mod source;

pub use api::StoreApiSource;
pub use csv::{CsvSource, read_csv_as_strings};
pub use error::{IngestError, Result};
pub use json::JsonSource;
pub use source::{DEFAULT_API_KEY_ENV, Source, SourceSpec};
