//! DataFrame helpers shared by the cleaning steps.
//!
//! Every step reads a column as optional strings, computes new values row by
//! row, and writes a typed column back under the same name.

use polars::prelude::{
    AnyValue, BooleanChunked, Column, DataFrame, DataType, NamedFrom, NewChunkedArray, Series,
    TimeUnit, UInt32Chunked,
};
use tracing::debug;

use crate::error::{Result, TransformError};

/// Converts a Polars `AnyValue` to a string, or `None` for nulls.
///
/// Integer-valued floats are written without a fractional part so that card
/// numbers read as floats come back as digit strings.
pub fn any_to_string(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Float32(v) => Some(format_numeric(f64::from(v))),
        AnyValue::Float64(v) => Some(format_numeric(v)),
        other => Some(other.to_string()),
    }
}

/// Formats a float without trailing zeros after the decimal point.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Look up a column, mapping absence to [`TransformError::MissingColumn`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| TransformError::MissingColumn {
        column: name.to_string(),
    })
}

/// Read every value of a column as an optional string.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = require_column(df, name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

pub fn set_string_column(df: &mut DataFrame, name: &str, values: Vec<Option<String>>) -> Result<()> {
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

pub fn set_f64_column(df: &mut DataFrame, name: &str, values: Vec<Option<f64>>) -> Result<()> {
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

pub fn set_i64_column(df: &mut DataFrame, name: &str, values: Vec<i64>) -> Result<()> {
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

pub fn set_u64_column(df: &mut DataFrame, name: &str, values: Vec<Option<u64>>) -> Result<()> {
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

pub fn set_u32_column(df: &mut DataFrame, name: &str, values: Vec<Option<u32>>) -> Result<()> {
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

/// Write a `Date` column from days since 1970-01-01.
pub fn set_date_column(df: &mut DataFrame, name: &str, days: Vec<Option<i32>>) -> Result<()> {
    let series = Series::new(name.into(), days).cast(&DataType::Date)?;
    df.with_column(series)?;
    Ok(())
}

/// Write a millisecond `Datetime` column from milliseconds since the epoch.
pub fn set_datetime_column(df: &mut DataFrame, name: &str, millis: Vec<Option<i64>>) -> Result<()> {
    let series = Series::new(name.into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    df.with_column(series)?;
    Ok(())
}

/// Keep the rows whose flag is `true`, preserving their order.
pub fn filter_rows(df: DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Reorder rows by position.
pub fn take_rows(df: DataFrame, positions: Vec<u32>) -> Result<DataFrame> {
    let idx = UInt32Chunked::from_vec("idx".into(), positions);
    Ok(df.take(&idx)?)
}

/// Drop columns that some source exports carry and others do not.
pub fn drop_columns_if_present(mut df: DataFrame, names: &[&str]) -> Result<DataFrame> {
    for name in names {
        if has_column(&df, name) {
            df.drop_in_place(name)?;
        } else {
            debug!(column = %name, "column already absent");
        }
    }
    Ok(df)
}

/// Replace exact values in a string column using `(from, to)` pairs.
///
/// Returns the number of cells rewritten.
pub fn replace_values(df: &mut DataFrame, name: &str, pairs: &[(&str, &str)]) -> Result<usize> {
    let values = string_values(df, name)?;
    let mut replaced = 0usize;
    let updated: Vec<Option<String>> = values
        .into_iter()
        .map(|value| match value {
            Some(v) => match pairs.iter().find(|(from, _)| *from == v) {
                Some((_, to)) => {
                    replaced += 1;
                    Some((*to).to_string())
                }
                None => Some(v),
            },
            None => None,
        })
        .collect();
    if replaced > 0 {
        set_string_column(df, name, updated)?;
    }
    Ok(replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::IntoColumn;

    fn frame(values: Vec<Option<&str>>) -> DataFrame {
        DataFrame::new(vec![Series::new("code".into(), values).into_column()]).unwrap()
    }

    #[test]
    fn any_to_string_formats_whole_floats_as_digits() {
        assert_eq!(
            any_to_string(AnyValue::Float64(6011036876440620.0)),
            Some("6011036876440620".to_string())
        );
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), Some("1.5".to_string()));
        assert_eq!(any_to_string(AnyValue::Null), None);
        assert_eq!(any_to_string(AnyValue::Int64(-3)), Some("-3".to_string()));
    }

    #[test]
    fn string_values_reports_missing_column() {
        let df = frame(vec![Some("GB")]);
        let err = string_values(&df, "nope").unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn { .. }));
    }

    #[test]
    fn replace_values_counts_rewrites() {
        let mut df = frame(vec![Some("GGB"), Some("GB"), None, Some("GGB")]);
        let replaced = replace_values(&mut df, "code", &[("GGB", "GB")]).unwrap();
        assert_eq!(replaced, 2);
        let values = string_values(&df, "code").unwrap();
        assert_eq!(
            values,
            vec![
                Some("GB".to_string()),
                Some("GB".to_string()),
                None,
                Some("GB".to_string())
            ]
        );
    }

    #[test]
    fn filter_rows_preserves_order() {
        let df = frame(vec![Some("a"), Some("b"), Some("c")]);
        let df = filter_rows(df, &[true, false, true]).unwrap();
        let values = string_values(&df, "code").unwrap();
        assert_eq!(values, vec![Some("a".to_string()), Some("c".to_string())]);
    }

    #[test]
    fn drop_columns_if_present_ignores_absent() {
        let df = frame(vec![Some("a")]);
        let df = drop_columns_if_present(df, &["code", "Unnamed: 0"]).unwrap();
        assert_eq!(df.width(), 0);
    }
}
