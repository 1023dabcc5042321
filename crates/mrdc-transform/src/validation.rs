//! Allow-list filtering.

use mrdc_model::ValidEntries;
use polars::prelude::DataFrame;
use tracing::info;

use crate::data_utils::{filter_rows, string_values};
use crate::error::Result;

/// Per-row membership flags for an allow-list.
fn membership(df: &DataFrame, valid: &ValidEntries) -> Result<Vec<bool>> {
    let values = string_values(df, &valid.column)?;
    Ok(values
        .iter()
        .map(|value| valid.contains(value.as_deref()))
        .collect())
}

/// Number of rows whose value is not on the allow-list.
pub fn count_invalid(df: &DataFrame, valid: &ValidEntries) -> Result<usize> {
    Ok(membership(df, valid)?.iter().filter(|keep| !**keep).count())
}

/// Remove rows whose value in `valid.column` is not on the allow-list.
///
/// Missing values never match. Remaining rows keep their order.
pub fn drop_invalid(df: DataFrame, valid: &ValidEntries) -> Result<DataFrame> {
    let keep = membership(&df, valid)?;
    let dropped = keep.iter().filter(|k| !**k).count();
    info!(
        column = %valid.column,
        dropped,
        remaining = keep.len() - dropped,
        "dropped rows outside allow-list"
    );
    if dropped == 0 {
        return Ok(df);
    }
    filter_rows(df, &keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn countries(values: Vec<Option<&str>>) -> DataFrame {
        DataFrame::new(vec![
            Series::new("country_code".into(), values).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn drops_unlisted_and_missing() {
        let valid = ValidEntries::new("country_code", ["GB", "US"]);
        let df = countries(vec![Some("GB"), Some("XX"), None, Some("US")]);
        assert_eq!(count_invalid(&df, &valid).unwrap(), 2);
        let out = drop_invalid(df, &valid).unwrap();
        assert_eq!(
            string_values(&out, "country_code").unwrap(),
            vec![Some("GB".to_string()), Some("US".to_string())]
        );
    }

    #[test]
    fn match_is_case_sensitive() {
        let valid = ValidEntries::new("country_code", ["GB"]);
        let out = drop_invalid(countries(vec![Some("gb")]), &valid).unwrap();
        assert_eq!(out.height(), 0);
    }
}
