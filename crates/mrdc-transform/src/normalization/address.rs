//! Multi-line address splitting.

use mrdc_model::EntityKind;
use polars::prelude::DataFrame;
use tracing::debug;

use crate::data_utils::{set_string_column, string_values};
use crate::error::Result;

/// Output columns, in line order. The first one replaces the source column.
pub const ADDRESS_COLUMNS: [&str; 4] = ["address", "address_2", "address_3", "address_4"];

/// Separator used when lines past the last column are folded into it.
const OVERFLOW_SEPARATOR: &str = ", ";

/// Split one address block into at most four lines.
///
/// Lines are separated by newlines; blank lines are skipped. For cards the
/// last comma-delimited segment of the whole block is removed first. For
/// stores only the trailing `, <town>` of the last line is removed. Lines
/// beyond the fourth are joined onto the fourth so no text is lost.
pub fn split_address_lines(text: &str, kind: EntityKind) -> Vec<String> {
    let body = if kind.address_has_locality() {
        text.rsplit_once(',').map_or(text, |(head, _)| head)
    } else {
        text
    };
    let mut lines: Vec<String> = body
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if kind.address_last_line_has_town()
        && let Some(last) = lines.pop()
    {
        let head = last.rsplit_once(',').map_or(last.as_str(), |(head, _)| head.trim_end());
        if !head.is_empty() {
            lines.push(head.to_string());
        }
    }

    if lines.len() > ADDRESS_COLUMNS.len() {
        let overflow = lines.split_off(ADDRESS_COLUMNS.len() - 1);
        debug!(
            extra = overflow.len() - 1,
            "folded extra address lines into the last column"
        );
        lines.push(overflow.join(OVERFLOW_SEPARATOR));
    }
    lines
}

/// Explode the `address` column into `address`..`address_4`.
///
/// Missing addresses yield four missing lines.
pub fn split_address(mut df: DataFrame, kind: EntityKind) -> Result<DataFrame> {
    let values = string_values(&df, ADDRESS_COLUMNS[0])?;
    let mut columns: [Vec<Option<String>>; 4] = std::array::from_fn(|_| {
        Vec::with_capacity(values.len())
    });
    for value in values {
        let lines = value
            .as_deref()
            .map(|text| split_address_lines(text, kind))
            .unwrap_or_default();
        let mut lines = lines.into_iter();
        for column in &mut columns {
            column.push(lines.next());
        }
    }
    for (name, column) in ADDRESS_COLUMNS.iter().zip(columns) {
        set_string_column(&mut df, name, column)?;
    }
    Ok(df)
}
