use mrdc_model::EntityKind;
use polars::prelude::DataFrame;
use tracing::info;

use super::EntityCleaner;
use crate::data_utils::drop_columns_if_present;
use crate::error::Result;
use crate::index::set_row_index;

/// Personal data and export artifacts that do not belong in the fact table.
const DROPPED_COLUMNS: &[&str] = &["first_name", "last_name", "level_0", "1"];

/// Clean the orders table. Orders have no allow-list.
pub fn clean_order_data(df: DataFrame) -> Result<DataFrame> {
    let rows_in = df.height();
    let df = drop_columns_if_present(df, DROPPED_COLUMNS)?;
    let df = set_row_index(df)?;
    info!(rows_in, rows_out = df.height(), "cleaned order data");
    Ok(df)
}

pub struct OrderCleaner;

impl EntityCleaner for OrderCleaner {
    fn kind(&self) -> EntityKind {
        EntityKind::Order
    }

    fn description(&self) -> &'static str {
        "Drop name and placeholder columns, sort by index"
    }

    fn clean(&self, df: DataFrame) -> Result<DataFrame> {
        clean_order_data(df)
    }
}
