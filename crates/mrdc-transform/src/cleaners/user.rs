use mrdc_model::{EntityKind, ValidEntries};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use super::EntityCleaner;
use crate::data_utils::{filter_rows, has_column, replace_values, string_values};
use crate::error::Result;
use crate::index::set_row_index;
use crate::normalization::{normalize_date, split_address};
use crate::validation::drop_invalid;

/// Placeholder some exports write instead of leaving a surname empty.
const NULL_MARKER: &str = "NULL";

/// Country code typos seen in source data.
pub(crate) const COUNTRY_CODE_FIXES: &[(&str, &str)] = &[("GGB", "GB")];

/// Clean the legacy users table.
pub fn clean_user_data(df: DataFrame, valid: &ValidEntries) -> Result<DataFrame> {
    let rows_in = df.height();
    let df = set_row_index(df)?;

    let surnames = string_values(&df, "last_name")?;
    let keep: Vec<bool> = surnames
        .iter()
        .map(|name| name.as_deref().is_some_and(|n| n != NULL_MARKER))
        .collect();
    let null_rows = keep.iter().filter(|k| !**k).count();
    let mut df = filter_rows(df, &keep)?;
    debug!(dropped = null_rows, "dropped users without a surname");

    replace_values(&mut df, "country_code", COUNTRY_CODE_FIXES)?;
    let df = drop_invalid(df, valid)?;
    let df = normalize_date(df, "date_of_birth")?;
    let mut df = normalize_date(df, "join_date")?;
    if has_column(&df, "address") {
        df = split_address(df, EntityKind::User)?;
    }

    info!(rows_in, rows_out = df.height(), "cleaned user data");
    Ok(df)
}

pub struct UserCleaner {
    valid: ValidEntries,
}

impl UserCleaner {
    pub fn new(valid: ValidEntries) -> Self {
        Self { valid }
    }
}

impl EntityCleaner for UserCleaner {
    fn kind(&self) -> EntityKind {
        EntityKind::User
    }

    fn description(&self) -> &'static str {
        "Sort by index, drop NULL surnames and unknown countries, normalize dates, split address"
    }

    fn clean(&self, df: DataFrame) -> Result<DataFrame> {
        clean_user_data(df, &self.valid)
    }
}
