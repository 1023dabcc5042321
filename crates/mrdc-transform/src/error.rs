//! Error types for entity cleaning.

use thiserror::Error;

/// Why a single date string could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    /// Scrambled layouts must have exactly `year month day` tokens.
    #[error("expected 3 whitespace-separated tokens, found {0}")]
    TokenCount(usize),

    /// Month token is not a full English month name.
    #[error("unrecognized month name '{0}'")]
    UnknownMonth(String),

    /// Rewritten value is not a real `YYYY-MM-DD` calendar date.
    #[error("'{0}' is not a valid calendar date")]
    InvalidDate(String),

    /// Composite value is not a valid `YYYY-M-D HH:MM:SS` timestamp.
    #[error("'{0}' is not a valid timestamp")]
    InvalidTimestamp(String),
}

/// Why a weight expression could not be converted to kilograms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightError {
    #[error("multi-pack weight must look like '<count> x <grams>g'")]
    MalformedMultiPack,

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

/// Errors raised by cleaning steps. None of them are recovered inside the
/// cleaners; they surface to the caller unchanged.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column required by a cleaning step is absent.
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// A date value matched none of the recognized layouts.
    #[error("cannot normalize '{value}' in column '{column}': {source}")]
    Format {
        column: String,
        value: String,
        #[source]
        source: DateFormatError,
    },

    /// A numeric cast failed on leftover non-numeric characters.
    #[error("invalid numeric value '{value}' in column '{column}': {reason}")]
    InvalidNumber {
        column: String,
        value: String,
        reason: String,
    },

    /// Two rows carry the same row index.
    #[error("duplicate row index {value} in column '{column}'")]
    DuplicateIndex { column: String, value: i64 },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl TransformError {
    pub(crate) fn invalid_number(
        column: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidNumber {
            column: column.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, TransformError>;
