//! Product weight conversion to kilograms.
//!
//! Classification is by substring and the first match wins: multi-pack (`x`),
//! then ounces, then kilograms, then grams/millilitres. A multi-pack value also
//! contains `g`, so the multi-pack check must stay first.

use polars::prelude::DataFrame;
use tracing::debug;

use super::numeric::{parse_f64, round_to};
use crate::data_utils::{set_f64_column, string_values};
use crate::error::{Result, TransformError, WeightError};

/// Column holding the product weight.
pub const WEIGHT_COLUMN: &str = "weight";

const GRAMS_PER_KG: f64 = 1000.0;
const OUNCES_PER_KG: f64 = 35.274;

/// How a weight expression was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    MultiPack,
    Ounces,
    Kilograms,
    Grams,
}

impl WeightUnit {
    pub fn classify(value: &str) -> Self {
        if value.contains('x') {
            Self::MultiPack
        } else if value.contains("oz") {
            Self::Ounces
        } else if value.contains("kg") {
            Self::Kilograms
        } else {
            Self::Grams
        }
    }
}

/// Strip the trailing ` .` artifact some exports append.
fn strip_artifact(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed.strip_suffix(" .").unwrap_or(trimmed).trim()
}

fn number(value: &str) -> std::result::Result<f64, WeightError> {
    parse_f64(value).ok_or_else(|| WeightError::NotANumber(value.to_string()))
}

/// Convert one weight expression to kilograms.
pub fn weight_to_kg(value: &str) -> std::result::Result<f64, WeightError> {
    let value = strip_artifact(value);
    match WeightUnit::classify(value) {
        WeightUnit::MultiPack => {
            let tokens: Vec<&str> = value.split_whitespace().collect();
            let [count, "x", item] = tokens.as_slice() else {
                return Err(WeightError::MalformedMultiPack);
            };
            let item = item.strip_suffix('g').ok_or(WeightError::MalformedMultiPack)?;
            Ok(number(count)? * number(item)? / GRAMS_PER_KG)
        }
        WeightUnit::Ounces => {
            let ounces = number(value.trim_end_matches("oz"))?;
            Ok(round_to(ounces / OUNCES_PER_KG, 3))
        }
        WeightUnit::Kilograms => number(value.trim_end_matches("kg")),
        WeightUnit::Grams => {
            let grams = value
                .strip_suffix("ml")
                .or_else(|| value.strip_suffix('g'))
                .unwrap_or(value);
            Ok(number(grams)? / GRAMS_PER_KG)
        }
    }
}

/// Replace the `weight` column with kilograms as `Float64`.
pub fn normalize_weight(mut df: DataFrame) -> Result<DataFrame> {
    let values = string_values(&df, WEIGHT_COLUMN)?;
    let mut kilograms = Vec::with_capacity(values.len());
    for value in values {
        match value {
            None => kilograms.push(None),
            Some(raw) => {
                let kg = weight_to_kg(&raw).map_err(|err| {
                    TransformError::invalid_number(WEIGHT_COLUMN, raw.clone(), err.to_string())
                })?;
                kilograms.push(Some(kg));
            }
        }
    }
    set_f64_column(&mut df, WEIGHT_COLUMN, kilograms)?;
    debug!(rows = df.height(), "converted weights to kilograms");
    Ok(df)
}
