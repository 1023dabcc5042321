//! Calendar date normalization.
//!
//! Source exports mix four layouts for the same date:
//!
//! - `1968-10-16` (canonical)
//! - `1968/10/16`
//! - `1968 October 16`
//! - `October 1968 16`
//!
//! Canonical and slash layouts start with a four-digit year and a separator,
//! then carry a two-digit month at byte offset 5..7. Everything else is one of
//! the scrambled layouts, told apart by whether the first token is numeric.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::data_utils::{set_date_column, set_datetime_column, string_values};
use crate::error::{DateFormatError, Result, TransformError};

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Resolve a full English month name to its number (case-insensitive).
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == lower)
        .map(|idx| idx as u32 + 1)
}

/// Returns true for `YYYY-MM...` and `YYYY/MM...`: four year digits, a `-` or
/// `/` separator, then a zero-padded month `01`..`12`.
pub fn has_numeric_layout(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() < 7 || !bytes[..4].iter().all(u8::is_ascii_digit) {
        return false;
    }
    if !matches!(bytes[4], b'-' | b'/') {
        return false;
    }
    let Some(month) = value.get(5..7) else {
        return false;
    };
    month.bytes().all(|b| b.is_ascii_digit())
        && month
            .parse::<u32>()
            .is_ok_and(|m| (1..=12).contains(&m))
}

/// Rewrite a date string into `YYYY-MM-DD` text without validating the
/// calendar value.
pub fn standardize_date_layout(value: &str) -> std::result::Result<String, DateFormatError> {
    let trimmed = value.trim();
    let layout = if has_numeric_layout(trimmed) {
        trimmed.to_string()
    } else {
        reorder_scrambled(trimmed)?
    };
    Ok(layout.replace('/', "-"))
}

fn reorder_scrambled(value: &str) -> std::result::Result<String, DateFormatError> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let [first, second, day] = tokens.as_slice() else {
        return Err(DateFormatError::TokenCount(tokens.len()));
    };
    let (year, month_name) = if first.bytes().all(|b| b.is_ascii_digit()) {
        (*first, *second)
    } else {
        (*second, *first)
    };
    let month = month_number(month_name)
        .ok_or_else(|| DateFormatError::UnknownMonth(month_name.to_string()))?;
    Ok(format!("{year}-{month:02}-{day}"))
}

/// Whether reformatting changes the text of a recognized layout.
fn needs_rewrite(value: &str) -> bool {
    standardize_date_layout(value).is_ok_and(|layout| layout != value.trim())
}

/// Parse any recognized layout into a calendar date.
pub fn parse_date(value: &str) -> std::result::Result<NaiveDate, DateFormatError> {
    let layout = standardize_date_layout(value)?;
    NaiveDate::parse_from_str(&layout, DATE_FORMAT).map_err(|_| DateFormatError::InvalidDate(layout))
}

/// Parse a `YYYY-M-D HH:MM:SS` timestamp. Month and day may be unpadded.
pub fn parse_timestamp(value: &str) -> std::result::Result<NaiveDateTime, DateFormatError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| DateFormatError::InvalidTimestamp(value.to_string()))
}

/// Days since 1970-01-01, the physical representation of a Polars `Date`.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}

/// Milliseconds since the epoch, the physical representation of a
/// millisecond Polars `Datetime`.
pub fn millis_since_epoch(datetime: NaiveDateTime) -> i64 {
    datetime.and_utc().timestamp_millis()
}

/// Replace a string date column with a `Date` column.
///
/// Missing and blank values stay missing. The first value that cannot be
/// parsed aborts the call with [`TransformError::Format`].
pub fn normalize_date(mut df: DataFrame, column: &str) -> Result<DataFrame> {
    let values = string_values(&df, column)?;
    let mut days = Vec::with_capacity(values.len());
    let mut rewritten = 0usize;
    for value in values {
        match value.as_deref().map(str::trim) {
            None | Some("") => days.push(None),
            Some(raw) => {
                if needs_rewrite(raw) {
                    rewritten += 1;
                }
                let date = parse_date(raw).map_err(|source| TransformError::Format {
                    column: column.to_string(),
                    value: raw.to_string(),
                    source,
                })?;
                days.push(Some(days_since_epoch(date)));
            }
        }
    }
    set_date_column(&mut df, column, days)?;
    debug!(column = %column, rewritten, "normalized date column");
    Ok(df)
}

/// Replace a string column with a millisecond `Datetime` column.
///
/// Missing and blank values stay missing.
pub fn normalize_timestamp(mut df: DataFrame, column: &str) -> Result<DataFrame> {
    let values = string_values(&df, column)?;
    let mut millis = Vec::with_capacity(values.len());
    for value in values {
        match value.as_deref().map(str::trim) {
            None | Some("") => millis.push(None),
            Some(raw) => {
                let parsed = parse_timestamp(raw).map_err(|source| TransformError::Format {
                    column: column.to_string(),
                    value: raw.to_string(),
                    source,
                })?;
                millis.push(Some(millis_since_epoch(parsed)));
            }
        }
    }
    set_datetime_column(&mut df, column, millis)?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("October"), Some(10));
        assert_eq!(month_number("january"), Some(1));
        assert_eq!(month_number("DECEMBER"), Some(12));
        assert_eq!(month_number("Oct"), None);
    }

    #[test]
    fn test_has_numeric_layout() {
        assert!(has_numeric_layout("1968-10-16"));
        assert!(has_numeric_layout("1968/10/16"));
        assert!(!has_numeric_layout("1968 October 16"));
        assert!(!has_numeric_layout("1968-13-01"));
        assert!(!has_numeric_layout("1968"));
        assert!(!has_numeric_layout("May 2010 16"));
        assert!(!has_numeric_layout("May 2015 03"));
    }

    #[test]
    fn test_needs_rewrite() {
        assert!(!needs_rewrite("1968-10-16"));
        assert!(needs_rewrite("1968/10/16"));
        assert!(needs_rewrite("May 2010 16"));
        assert!(needs_rewrite("1968 October 16"));
        assert!(!needs_rewrite("Smarch 2001 01"));
    }

    #[test]
    fn test_short_month_name_first() {
        assert_eq!(parse_date("May 2010 16"), Ok(ymd(2010, 5, 16)));
        assert_eq!(parse_date("May 2015 03"), Ok(ymd(2015, 5, 3)));
        assert_eq!(parse_date("June 2011 01"), Ok(ymd(2011, 6, 1)));
    }

    #[test]
    fn test_layouts_converge() {
        for raw in ["1968-10-16", "1968/10/16", "1968 October 16", "October 1968 16"] {
            assert_eq!(parse_date(raw), Ok(ymd(1968, 10, 16)), "{raw}");
        }
    }

    #[test]
    fn test_unknown_month() {
        assert_eq!(
            parse_date("Smarch 2001 01"),
            Err(DateFormatError::UnknownMonth("Smarch".to_string()))
        );
    }

    #[test]
    fn test_token_count() {
        assert_eq!(
            parse_date("October 1968"),
            Err(DateFormatError::TokenCount(2))
        );
        assert_eq!(
            parse_date("16 of October 1968"),
            Err(DateFormatError::TokenCount(4))
        );
    }

    #[test]
    fn test_invalid_calendar_date() {
        assert!(matches!(
            parse_date("2001-02-30"),
            Err(DateFormatError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parse_timestamp_unpadded() {
        let parsed = parse_timestamp("2012-9-19 22:00:06").unwrap();
        assert_eq!(parsed.date(), ymd(2012, 9, 19));
        assert_eq!(parsed.format("%H:%M:%S").to_string(), "22:00:06");
    }

    #[test]
    fn test_days_since_epoch() {
        assert_eq!(days_since_epoch(ymd(1970, 1, 1)), 0);
        assert_eq!(days_since_epoch(ymd(1970, 1, 2)), 1);
        assert_eq!(days_since_epoch(ymd(1969, 12, 31)), -1);
    }
}
