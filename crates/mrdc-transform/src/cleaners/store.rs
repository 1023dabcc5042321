use mrdc_model::{EntityKind, ValidEntries};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use super::EntityCleaner;
use super::user::COUNTRY_CODE_FIXES;
use crate::data_utils::{
    drop_columns_if_present, has_column, replace_values, set_u32_column, string_values,
};
use crate::error::{Result, TransformError};
use crate::index::set_row_index;
use crate::normalization::numeric::digits_only;
use crate::normalization::{normalize_date, split_address};
use crate::validation::drop_invalid;

const CONTINENT_FIXES: &[(&str, &str)] = &[("eeEurope", "Europe"), ("eeAmerica", "America")];

fn clean_staff_numbers(mut df: DataFrame) -> Result<DataFrame> {
    let values = string_values(&df, "staff_numbers")?;
    let mut counts = Vec::with_capacity(values.len());
    for value in values {
        match value {
            None => counts.push(None),
            Some(raw) => {
                let digits = digits_only(&raw);
                let count = digits.parse::<u32>().map_err(|err| {
                    TransformError::invalid_number("staff_numbers", raw.clone(), err.to_string())
                })?;
                counts.push(Some(count));
            }
        }
    }
    set_u32_column(&mut df, "staff_numbers", counts)?;
    Ok(df)
}

/// Clean store details returned by the store API.
pub fn clean_store_data(df: DataFrame, valid: &ValidEntries) -> Result<DataFrame> {
    let rows_in = df.height();
    let mut df = set_row_index(df)?;

    replace_values(&mut df, "country_code", COUNTRY_CODE_FIXES)?;
    let mut df = drop_invalid(df, valid)?;

    let fixed = replace_values(&mut df, "continent", CONTINENT_FIXES)?;
    debug!(fixed, "repaired continent typos");

    let df = normalize_date(df, "opening_date")?;
    let df = clean_staff_numbers(df)?;
    let mut df = drop_columns_if_present(df, &["lat"])?;
    if has_column(&df, "address") {
        df = split_address(df, EntityKind::Store)?;
    }

    info!(rows_in, rows_out = df.height(), "cleaned store data");
    Ok(df)
}

pub struct StoreCleaner {
    valid: ValidEntries,
}

impl StoreCleaner {
    pub fn new(valid: ValidEntries) -> Self {
        Self { valid }
    }
}

impl EntityCleaner for StoreCleaner {
    fn kind(&self) -> EntityKind {
        EntityKind::Store
    }

    fn description(&self) -> &'static str {
        "Sort by index, drop unknown countries, fix continents, normalize opening date and staff count"
    }

    fn clean(&self, df: DataFrame) -> Result<DataFrame> {
        clean_store_data(df, &self.valid)
    }
}
