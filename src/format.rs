//! Text rendering of tables for the terminal.

use crate::expression::parse_number;
use crate::table::{Row, Table};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, TableComponent};

/// Render rows as a bordered grid with a header row.
///
/// Columns whose every cell is numeric are right-aligned. At most `limit`
/// rows are rendered when a limit is given.
pub fn render_grid(table: &Table, limit: Option<usize>) -> String {
    let header = table.header();
    let cells: Vec<Vec<&str>> = table
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|row| header.iter().map(|h| row.get(h).unwrap_or("")).collect())
        .collect();

    let mut grid = comfy_table::Table::new();
    grid.load_preset(ASCII_FULL)
        .set_style(TableComponent::LeftBorderIntersections, '+')
        .set_style(TableComponent::RightBorderIntersections, '+');
    grid.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).set_alignment(CellAlignment::Left)),
    );
    for row in &cells {
        grid.add_row(row.iter().map(Cell::new));
    }

    for (i, column) in grid.column_iter_mut().enumerate() {
        if !cells.is_empty() && cells.iter().all(|r| parse_number(r[i]).is_some()) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    format!("{}\n", grid)
}

/// Render one row as `column: value` pairs in header order.
pub fn render_row(header: &[String], row: &Row) -> String {
    header
        .iter()
        .filter_map(|h| row.get(h).map(|v| format!("{}: {}", h, v)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render up to `limit` rows as a numbered list, with a note when rows were
/// left out.
pub fn render_numbered(table: &Table, limit: usize) -> String {
    let mut out = String::new();
    for (i, row) in table.iter().take(limit).enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, render_row(table.header(), row)));
    }
    if table.len() > limit {
        out.push_str(&format!(
            "Note: only showing first {} rows out of {}.\n",
            limit,
            table.len()
        ));
    }
    out
}
