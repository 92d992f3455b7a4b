//! In-memory table model.
//!
//! A [`Table`] is an ordered header plus an ordered sequence of [`Row`]s.
//! Tables are never mutated once built: every query operation produces a
//! new table that shares the header and carries its own row sequence.

pub mod resolver;
pub mod row;

pub use resolver::{resolve_column, resolve_first_row_column, ColumnMap};
pub use row::Row;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::HashSet;

/// Field delimiter for raw lines. Quoting is not recognised on input.
pub const DELIMITER: char = ',';

/// Ordered header plus ordered rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create a table. Repeated header names keep their first position only.
    pub fn new(header: Vec<String>, rows: Vec<Row>) -> Self {
        let mut seen = HashSet::new();
        let header = header
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect();
        Self { header, rows }
    }

    /// Build a table from literal records, one value per header entry.
    /// Records shorter than the header produce ragged rows.
    pub fn from_records(header: &[&str], records: &[&[&str]]) -> Self {
        let rows = records
            .iter()
            .map(|record| Row::from_pairs(header.iter().copied().zip(record.iter().copied())))
            .collect();
        Self::new(header.iter().map(|h| h.to_string()).collect(), rows)
    }

    /// A table with the same header and a different row sequence.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            header: self.header.clone(),
            rows,
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// A table is empty when it has no rows, whatever its header.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_row(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Columns carried by the first row, in header order.
    pub fn first_row_columns(&self) -> impl Iterator<Item = &str> {
        let first = self.rows.first();
        self.header
            .iter()
            .map(String::as_str)
            .filter(move |name| first.map_or(false, |row| row.contains(name)))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Serializes as a sequence of objects whose keys follow header order.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&OrderedRow {
                header: &self.header,
                row,
            })?;
        }
        seq.end()
    }
}

struct OrderedRow<'a> {
    header: &'a [String],
    row: &'a Row,
}

impl Serialize for OrderedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for name in self.header {
            if let Some(value) = self.row.get(name) {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

/// Parse a header line and data lines into a table.
///
/// Each line is trimmed and split on [`DELIMITER`]. Values are zipped with
/// the header: surplus fields are dropped and short lines give rows with
/// fewer cells than the header. A repeated header name keeps the last value
/// on the line.
pub fn load_table<I, S>(header_line: &str, data_lines: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let header: Vec<String> = split_line(header_line).map(str::to_string).collect();
    let rows = data_lines
        .into_iter()
        .map(|line| {
            Row::from_pairs(
                header
                    .iter()
                    .map(String::as_str)
                    .zip(split_line(line.as_ref())),
            )
        })
        .collect();
    Table::new(header, rows)
}

fn split_line(line: &str) -> impl Iterator<Item = &str> {
    line.trim().split(DELIMITER)
}

/// Render a table as delimited lines: the header, then one line per row.
///
/// Cells absent from a row are written as empty fields. Fields containing
/// the delimiter, a double quote or a line break are quoted.
pub fn export_lines(table: &Table) -> Vec<String> {
    let mut lines = Vec::with_capacity(table.len() + 1);
    lines.push(join_fields(table.header().iter().map(String::as_str)));
    for row in table {
        lines.push(join_fields(
            table.header().iter().map(|name| row.get(name).unwrap_or("")),
        ));
    }
    lines
}

fn join_fields<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields
        .map(quote_field)
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

fn quote_field(field: &str) -> String {
    if field.contains([DELIMITER, '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
