//! Row index handling.
//!
//! Source tables carry an `index` column as text. Cleaners cast it to
//! `Int64` and sort rows by it so downstream joins can rely on order.

use std::collections::HashSet;

use polars::prelude::DataFrame;

use crate::data_utils::{set_i64_column, string_values, take_rows};
use crate::error::{Result, TransformError};
use crate::normalization::numeric::parse_i64;

/// Name of the row index column.
pub const INDEX_COLUMN: &str = "index";

/// Cast `index` to integers and sort rows ascending by it.
///
/// Missing, non-integer or duplicate indices are rejected. The sort is
/// stable, though with unique keys order is fully determined.
pub fn set_row_index(df: DataFrame) -> Result<DataFrame> {
    let values = string_values(&df, INDEX_COLUMN)?;
    let mut indices = Vec::with_capacity(values.len());
    let mut seen = HashSet::with_capacity(values.len());
    for value in values {
        let raw = value.unwrap_or_default();
        let parsed = parse_i64(&raw).ok_or_else(|| {
            TransformError::invalid_number(INDEX_COLUMN, raw.clone(), "expected an integer")
        })?;
        if !seen.insert(parsed) {
            return Err(TransformError::DuplicateIndex {
                column: INDEX_COLUMN.to_string(),
                value: parsed,
            });
        }
        indices.push(parsed);
    }

    let mut positions: Vec<u32> = (0..indices.len() as u32).collect();
    positions.sort_by_key(|&pos| indices[pos as usize]);

    let mut df = df;
    set_i64_column(&mut df, INDEX_COLUMN, indices)?;
    take_rows(df, positions)
}

/// Replace `index` with a fresh 0-based sequence in current row order.
pub fn reset_row_index(mut df: DataFrame) -> Result<DataFrame> {
    let fresh: Vec<i64> = (0..df.height() as i64).collect();
    set_i64_column(&mut df, INDEX_COLUMN, fresh)?;
    Ok(df)
}
