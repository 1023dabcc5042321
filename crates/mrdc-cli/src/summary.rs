use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mrdc_cli::types::{EntitySummary, PipelineResult};

pub fn print_summary(result: &PipelineResult) {
    println!("Output: {}", result.output_dir.display());
    if result.dry_run {
        println!("Dry run: no tables written");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Table"),
        header_cell("Source"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Dropped"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    for summary in &result.entities {
        table.add_row(vec![
            Cell::new(summary.kind)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.kind.target_table()),
            dim_cell(&summary.source),
            count_cell(summary.rows_in),
            count_cell(summary.rows_out),
            dropped_cell(summary.dropped()),
            status_cell(summary),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(result.total_rows_out()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    let failures: Vec<&EntitySummary> = result.entities.iter().filter(|e| e.failed()).collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for summary in failures {
            if let Some(error) = &summary.error {
                eprintln!("- {}: {error}", summary.kind);
            }
        }
    }
}

fn status_cell(summary: &EntitySummary) -> Cell {
    if summary.failed() {
        return Cell::new("failed")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold);
    }
    match &summary.output {
        Some(path) => Cell::new(file_name(path)).fg(Color::Green),
        None => dim_cell("cleaned"),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dropped_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(Color::Yellow),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
