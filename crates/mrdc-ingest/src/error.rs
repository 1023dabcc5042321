//! Error types for extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting a source into a DataFrame.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to parse JSON.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON parsed but is not a record array or a column-oriented object.
    #[error("unsupported JSON layout in {origin}: {reason}")]
    JsonLayout { origin: String, reason: String },

    // === HTTP Errors ===
    /// Request could not be sent or its body could not be read.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Response body lacks an expected field.
    #[error("unexpected response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    /// API key environment variable is unset.
    #[error("environment variable {var} is not set")]
    MissingApiKey { var: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        IngestError::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, IngestError>;
