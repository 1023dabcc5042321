use mrdc_model::{EntityKind, ValidEntries};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use super::EntityCleaner;
use crate::data_utils::{
    drop_columns_if_present, has_column, set_string_column, set_u64_column, string_values,
};
use crate::error::{Result, TransformError};
use crate::index::reset_row_index;
use crate::normalization::numeric::strip_chars;
use crate::normalization::{normalize_date, split_address};
use crate::validation::drop_invalid;

/// Column merging card number and expiry date, produced by PDF table parsing.
pub const COMPOUND_CARD_COLUMN: &str = "card_number expiry_date";

const PLACEHOLDER_COLUMN: &str = "Unnamed: 0";

/// Backfill `card_number` and `expiry_date` from the compound column.
///
/// Only missing targets are filled. The compound column is left in place.
pub fn reconcile_card_fields(mut df: DataFrame) -> Result<DataFrame> {
    if !has_column(&df, COMPOUND_CARD_COLUMN) {
        return Ok(df);
    }
    let compound = string_values(&df, COMPOUND_CARD_COLUMN)?;
    let mut numbers = string_values(&df, "card_number")?;
    let mut expiries = string_values(&df, "expiry_date")?;

    let mut filled = 0usize;
    for ((merged, number), expiry) in compound.iter().zip(&mut numbers).zip(&mut expiries) {
        let Some(merged) = merged.as_deref().map(str::trim).filter(|m| !m.is_empty()) else {
            continue;
        };
        if number.is_some() && expiry.is_some() {
            continue;
        }
        let (card, date) = merged.split_once(' ').ok_or_else(|| {
            TransformError::invalid_number(
                COMPOUND_CARD_COLUMN,
                merged,
                "expected '<card_number> <expiry_date>'",
            )
        })?;
        if number.is_none() {
            *number = Some(card.trim().to_string());
        }
        if expiry.is_none() {
            *expiry = Some(date.trim().to_string());
        }
        filled += 1;
    }

    if filled > 0 {
        set_string_column(&mut df, "card_number", numbers)?;
        set_string_column(&mut df, "expiry_date", expiries)?;
    }
    debug!(filled, "backfilled card fields from compound column");
    Ok(df)
}

fn cast_card_number(mut df: DataFrame) -> Result<DataFrame> {
    let values = string_values(&df, "card_number")?;
    let mut numbers = Vec::with_capacity(values.len());
    for value in values {
        match value {
            None => numbers.push(None),
            Some(raw) => {
                let digits = strip_chars(raw.trim(), &['?']);
                let number = digits.parse::<u64>().map_err(|err| {
                    TransformError::invalid_number("card_number", raw.clone(), err.to_string())
                })?;
                numbers.push(Some(number));
            }
        }
    }
    set_u64_column(&mut df, "card_number", numbers)?;
    Ok(df)
}

/// Clean card details extracted from the PDF export.
pub fn clean_card_data(df: DataFrame, valid: &ValidEntries) -> Result<DataFrame> {
    let rows_in = df.height();
    let df = drop_invalid(df, valid)?;
    let df = normalize_date(df, "date_payment_confirmed")?;
    let df = reconcile_card_fields(df)?;
    let df = drop_columns_if_present(df, &[COMPOUND_CARD_COLUMN, PLACEHOLDER_COLUMN])?;
    let mut df = cast_card_number(df)?;
    if has_column(&df, "address") {
        df = split_address(df, EntityKind::Card)?;
    }
    let df = reset_row_index(df)?;

    info!(rows_in, rows_out = df.height(), "cleaned card data");
    Ok(df)
}

pub struct CardCleaner {
    valid: ValidEntries,
}

impl CardCleaner {
    pub fn new(valid: ValidEntries) -> Self {
        Self { valid }
    }
}

impl EntityCleaner for CardCleaner {
    fn kind(&self) -> EntityKind {
        EntityKind::Card
    }

    fn description(&self) -> &'static str {
        "Drop unknown providers, normalize payment date, reconcile card number and expiry"
    }

    fn clean(&self, df: DataFrame) -> Result<DataFrame> {
        clean_card_data(df, &self.valid)
    }
}
