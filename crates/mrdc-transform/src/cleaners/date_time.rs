use mrdc_model::{EntityKind, ValidEntries};
use polars::prelude::DataFrame;
use tracing::info;

use super::EntityCleaner;
use crate::data_utils::{set_string_column, string_values};
use crate::error::Result;
use crate::normalization::normalize_timestamp;
use crate::validation::drop_invalid;

/// Composite timestamp column added by the cleaner.
pub const DATE_COLUMN: &str = "date";

/// Clean sale date/time events and add a composite `date` timestamp.
///
/// A row with any missing component gets a missing `date`.
pub fn clean_date_time_data(df: DataFrame, valid: &ValidEntries) -> Result<DataFrame> {
    let rows_in = df.height();
    let mut df = drop_invalid(df, valid)?;

    let years = string_values(&df, "year")?;
    let months = string_values(&df, "month")?;
    let days = string_values(&df, "day")?;
    let times = string_values(&df, "timestamp")?;

    let composites: Vec<Option<String>> = years
        .into_iter()
        .zip(months)
        .zip(days)
        .zip(times)
        .map(|(((year, month), day), time)| {
            Some(format!("{}-{}-{} {}", year?, month?, day?, time?))
        })
        .collect();
    set_string_column(&mut df, DATE_COLUMN, composites)?;
    let df = normalize_timestamp(df, DATE_COLUMN)?;

    info!(rows_in, rows_out = df.height(), "cleaned date/time data");
    Ok(df)
}

pub struct DateTimeCleaner {
    valid: ValidEntries,
}

impl DateTimeCleaner {
    pub fn new(valid: ValidEntries) -> Self {
        Self { valid }
    }
}

impl EntityCleaner for DateTimeCleaner {
    fn kind(&self) -> EntityKind {
        EntityKind::DateTime
    }

    fn description(&self) -> &'static str {
        "Drop unknown months, build composite timestamp"
    }

    fn clean(&self, df: DataFrame) -> Result<DataFrame> {
        clean_date_time_data(df, &self.valid)
    }
}
