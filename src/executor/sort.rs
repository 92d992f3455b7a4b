//! Sort operation.
//!
//! Rows are ordered by a single column. The column is compared numerically
//! only if every row's cell parses as a number (a missing cell counts as
//! zero); otherwise the whole column is compared as lowercased text (a
//! missing cell counts as the empty string). The sort is stable in both
//! directions.
//!
//! Numeric keys use the IEEE total order, so `NaN` cells sort after every
//! number.

use crate::expression::{parse_number, QueryError, QueryResult};
use crate::table::{ColumnMap, Row, Table};
use log::debug;
use std::cmp::Ordering;
use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only "desc" (any case, surrounding whitespace ignored) selects
    /// descending; anything else is ascending.
    pub fn from_input(input: &str) -> Self {
        if input.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ascending",
            SortOrder::Desc => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the sort column ended up being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKeyKind {
    Numeric,
    Text,
}

/// Sort a table by one column.
///
/// The column resolves through a [`ColumnMap`] of the first row.
pub fn sort(table: &Table, column: &str, order: SortOrder) -> QueryResult<Table> {
    if table.is_empty() {
        return Err(QueryError::NoData);
    }
    let columns = ColumnMap::from_first_row(table);
    let column = columns
        .resolve(column)
        .ok_or_else(|| QueryError::ColumnNotFound(column.trim().to_lowercase()))?;

    let (rows, kind) = sort_rows(table.rows(), column, order);
    debug!(
        "Sorted {} rows by '{}' ({}, {:?} keys)",
        rows.len(),
        column,
        order,
        kind
    );
    Ok(table.with_rows(rows))
}

fn sort_rows(rows: &[Row], column: &str, order: SortOrder) -> (Vec<Row>, SortKeyKind) {
    let numeric_keys: Option<Vec<f64>> = rows
        .iter()
        .map(|row| row.get(column).map_or(Some(0.0), parse_number))
        .collect();

    match numeric_keys {
        Some(keys) => {
            let sorted = sort_by_keys(rows, keys, order, f64::total_cmp);
            (sorted, SortKeyKind::Numeric)
        }
        None => {
            let keys: Vec<String> = rows
                .iter()
                .map(|row| row.get(column).unwrap_or("").to_lowercase())
                .collect();
            (sort_by_keys(rows, keys, order, |a, b| a.cmp(b)), SortKeyKind::Text)
        }
    }
}

fn sort_by_keys<K, F>(rows: &[Row], keys: Vec<K>, order: SortOrder, cmp: F) -> Vec<Row>
where
    F: Fn(&K, &K) -> Ordering,
{
    let mut keyed: Vec<(K, &Row)> = keys.into_iter().zip(rows).collect();
    // slice::sort_by is stable, and reversing the comparison keeps equal
    // keys in their original order.
    keyed.sort_by(|a, b| match order {
        SortOrder::Asc => cmp(&a.0, &b.0),
        SortOrder::Desc => cmp(&b.0, &a.0),
    });
    keyed.into_iter().map(|(_, row)| row.clone()).collect()
}
