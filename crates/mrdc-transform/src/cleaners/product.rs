use mrdc_model::{EntityKind, ValidEntries};
use polars::prelude::DataFrame;
use tracing::info;

use super::EntityCleaner;
use crate::data_utils::{has_column, set_f64_column, string_values};
use crate::error::{Result, TransformError};
use crate::index::{INDEX_COLUMN, set_row_index};
use crate::normalization::numeric::{parse_f64, strip_chars};
use crate::normalization::{normalize_date, normalize_weight};
use crate::validation::drop_invalid;

/// Unnamed index column written by the catalogue export.
const PLACEHOLDER_INDEX: &str = "Unnamed: 0";

fn clean_price(mut df: DataFrame) -> Result<DataFrame> {
    let values = string_values(&df, "product_price")?;
    let mut prices = Vec::with_capacity(values.len());
    for value in values {
        match value {
            None => prices.push(None),
            Some(raw) => {
                let price = parse_f64(&strip_chars(&raw, &['£'])).ok_or_else(|| {
                    TransformError::invalid_number("product_price", raw.clone(), "not a number")
                })?;
                prices.push(Some(price));
            }
        }
    }
    set_f64_column(&mut df, "product_price", prices)?;
    Ok(df)
}

/// Clean the product catalogue.
pub fn clean_product_data(mut df: DataFrame, valid: &ValidEntries) -> Result<DataFrame> {
    let rows_in = df.height();
    if !has_column(&df, INDEX_COLUMN) && has_column(&df, PLACEHOLDER_INDEX) {
        df.rename(PLACEHOLDER_INDEX, INDEX_COLUMN.into())?;
    }
    let df = set_row_index(df)?;
    let df = drop_invalid(df, valid)?;
    let df = clean_price(df)?;
    let df = normalize_date(df, "date_added")?;
    let df = normalize_weight(df)?;

    info!(rows_in, rows_out = df.height(), "cleaned product data");
    Ok(df)
}

pub struct ProductCleaner {
    valid: ValidEntries,
}

impl ProductCleaner {
    pub fn new(valid: ValidEntries) -> Self {
        Self { valid }
    }
}

impl EntityCleaner for ProductCleaner {
    fn kind(&self) -> EntityKind {
        EntityKind::Product
    }

    fn description(&self) -> &'static str {
        "Sort by index, drop unknown categories, parse price, normalize date added and weight"
    }

    fn clean(&self, df: DataFrame) -> Result<DataFrame> {
        clean_product_data(df, &self.valid)
    }
}
