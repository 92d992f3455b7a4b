//! Case-insensitive column name resolution.
//!
//! Three lookups exist and they are deliberately not interchangeable:
//!
//! - [`resolve_column`] matches against the full header and returns the
//!   first entry whose lowercase form equals the input's.
//! - [`resolve_first_row_column`] only consults the columns present in the
//!   first row. The operator filter resolves this way.
//! - [`ColumnMap`] is built once from the first row's columns, keyed by
//!   lowercase name, with the later column winning a case collision. Input
//!   is trimmed before lookup. The advanced filter and sort resolve this way.

use crate::table::Table;
use std::collections::HashMap;

/// Resolve a user-supplied column name against the table header.
///
/// Returns `None` when nothing matches or the table has no rows.
pub fn resolve_column<'a>(table: &'a Table, name: &str) -> Option<&'a str> {
    if table.is_empty() {
        return None;
    }
    let wanted = name.to_lowercase();
    table
        .header()
        .iter()
        .find(|column| column.to_lowercase() == wanted)
        .map(String::as_str)
}

/// Resolve a column against the first row's columns only. Surrounding
/// whitespace in `name` is ignored.
pub fn resolve_first_row_column<'a>(table: &'a Table, name: &str) -> Option<&'a str> {
    let wanted = name.trim().to_lowercase();
    table
        .first_row_columns()
        .find(|column| column.to_lowercase() == wanted)
}

/// Lowercase name to canonical name, built from the first row.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    by_lowercase: HashMap<String, String>,
}

impl ColumnMap {
    pub fn from_first_row(table: &Table) -> Self {
        let by_lowercase = table
            .first_row_columns()
            .map(|column| (column.to_lowercase(), column.to_string()))
            .collect();
        Self { by_lowercase }
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.by_lowercase
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }
}
