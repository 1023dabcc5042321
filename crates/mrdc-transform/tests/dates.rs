//! Tests for date normalization.

use chrono::NaiveDate;
use polars::prelude::*;
use proptest::prelude::*;

use mrdc_transform::normalization::date::{
    days_since_epoch, millis_since_epoch, normalize_date, normalize_timestamp, parse_date,
};
use mrdc_transform::{DateFormatError, TransformError};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn date_frame(values: Vec<Option<&str>>) -> DataFrame {
    DataFrame::new(vec![Series::new("join_date".into(), values).into()]).unwrap()
}

fn days(y: i32, m: u32, d: u32) -> i32 {
    days_since_epoch(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

#[test]
fn test_slashes_become_dates() {
    let df = normalize_date(date_frame(vec![Some("1972/09/09")]), "join_date").unwrap();
    let col = df.column("join_date").unwrap();
    assert_eq!(col.dtype(), &DataType::Date);
    assert_eq!(col.get(0).unwrap(), AnyValue::Date(days(1972, 9, 9)));
}

#[test]
fn test_month_year_day() {
    let df = normalize_date(date_frame(vec![Some("July 1973 08")]), "join_date").unwrap();
    let col = df.column("join_date").unwrap();
    assert_eq!(col.get(0).unwrap(), AnyValue::Date(days(1973, 7, 8)));
}

#[test]
fn test_three_letter_month_before_twenty_tens_year() {
    let df = date_frame(vec![Some("May 2010 16"), Some("May 2015 03")]);
    let df = normalize_date(df, "join_date").unwrap();
    let col = df.column("join_date").unwrap();
    assert_eq!(col.get(0).unwrap(), AnyValue::Date(days(2010, 5, 16)));
    assert_eq!(col.get(1).unwrap(), AnyValue::Date(days(2015, 5, 3)));
}

#[test]
fn test_timestamp_column() {
    let df = DataFrame::new(vec![
        Series::new(
            "date".into(),
            vec![Some("2012-9-19 22:00:06"), None, Some(" ")],
        )
        .into(),
    ])
    .unwrap();
    let df = normalize_timestamp(df, "date").unwrap();
    let col = df.column("date").unwrap();
    assert_eq!(
        col.dtype(),
        &DataType::Datetime(TimeUnit::Milliseconds, None)
    );
    let expected = NaiveDate::from_ymd_opt(2012, 9, 19)
        .unwrap()
        .and_hms_opt(22, 0, 6)
        .unwrap();
    let physical = col.cast(&DataType::Int64).unwrap();
    let physical = physical.i64().unwrap();
    assert_eq!(physical.get(0), Some(millis_since_epoch(expected)));
    assert_eq!(physical.get(1), None);
    assert_eq!(physical.get(2), None);
}

#[test]
fn test_unparseable_timestamp_names_column() {
    let df = DataFrame::new(vec![Series::new("date".into(), vec!["2012-9-19"]).into()]).unwrap();
    let err = normalize_timestamp(df, "date").unwrap_err();
    assert!(matches!(
        err,
        TransformError::Format { ref column, source: DateFormatError::InvalidTimestamp(_), .. }
            if column == "date"
    ));
}

#[test]
fn test_mixed_layouts_in_one_column() {
    let df = date_frame(vec![
        Some("1968 October 16"),
        Some("October 1968 16"),
        Some("1968-10-16"),
        None,
        Some("  "),
    ]);
    let df = normalize_date(df, "join_date").unwrap();
    let col = df.column("join_date").unwrap();
    for idx in 0..3 {
        assert_eq!(col.get(idx).unwrap(), AnyValue::Date(days(1968, 10, 16)));
    }
    assert_eq!(col.get(3).unwrap(), AnyValue::Null);
    assert_eq!(col.get(4).unwrap(), AnyValue::Null);
}

#[test]
fn test_unknown_month_aborts_column() {
    let df = date_frame(vec![Some("1999-01-01"), Some("Smarch 1999 01")]);
    let err = normalize_date(df, "join_date").unwrap_err();
    match err {
        TransformError::Format { column, value, source } => {
            assert_eq!(column, "join_date");
            assert_eq!(value, "Smarch 1999 01");
            assert_eq!(source, DateFormatError::UnknownMonth("Smarch".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_column() {
    let err = normalize_date(date_frame(vec![]), "date_of_birth").unwrap_err();
    assert!(matches!(err, TransformError::MissingColumn { .. }));
}

proptest! {
    #[test]
    fn layouts_converge(year in 1900i32..2100, month in 1u32..=12, day in 1u32..=28) {
        let name = MONTHS[(month - 1) as usize];
        let expected = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let layouts = [
            format!("{year}-{month:02}-{day:02}"),
            format!("{year}/{month:02}/{day:02}"),
            format!("{year} {name} {day:02}"),
            format!("{name} {year} {day:02}"),
        ];
        for layout in &layouts {
            prop_assert_eq!(parse_date(layout), Ok(expected));
        }
    }
}
