//! Read-only reports: column listing, unique values and column statistics.

use crate::expression::{parse_all_numbers, QueryError, QueryResult};
use crate::table::{resolve_column, Table};
use log::debug;
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Column names in header order.
pub fn list_columns(table: &Table) -> QueryResult<Vec<String>> {
    if table.is_empty() {
        return Err(QueryError::NoData);
    }
    Ok(table.header().to_vec())
}

/// Distinct texts of a column. Rows without the cell contribute nothing.
pub fn unique_values(table: &Table, column: &str) -> QueryResult<BTreeSet<String>> {
    if table.is_empty() {
        return Err(QueryError::NoData);
    }
    let column = resolve_column(table, column)
        .ok_or_else(|| QueryError::ColumnNotFound(column.to_string()))?;
    Ok(table
        .iter()
        .filter_map(|row| row.get(column))
        .map(str::to_string)
        .collect())
}

/// Min, max and mean of an all-numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    /// Arithmetic mean, unrounded. Reported with two decimals.
    #[serde(serialize_with = "serialize_rounded")]
    pub average: f64,
}

impl NumericSummary {
    fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let average = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self { min, max, average })
    }

    /// Mean rounded to two decimal places
    pub fn rounded_average(&self) -> f64 {
        round_to_cents(self.average)
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn serialize_rounded<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to_cents(*value))
}

/// Summary of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    /// Rows that carry the column
    pub total: usize,
    /// Distinct texts among those rows
    pub unique: usize,
    /// Present only when every collected value parses as a number
    pub numeric: Option<NumericSummary>,
}

/// Summarise a column.
///
/// The column resolves against the header. When no row carries it the
/// column is reported as not found.
pub fn column_stats(table: &Table, column: &str) -> QueryResult<ColumnStats> {
    let resolved = resolve_column(table, column)
        .ok_or_else(|| QueryError::ColumnNotFound(column.to_string()))?;

    let values: Vec<&str> = table.iter().filter_map(|row| row.get(resolved)).collect();
    if values.is_empty() {
        return Err(QueryError::ColumnNotFound(resolved.to_string()));
    }
    let unique = values.iter().collect::<HashSet<_>>().len();
    let numeric = parse_all_numbers(values.iter().copied())
        .and_then(|numbers| NumericSummary::from_values(&numbers));
    debug!(
        "Stats for '{}': {} values, numeric={}",
        resolved,
        values.len(),
        numeric.is_some()
    );

    Ok(ColumnStats {
        column: resolved.to_string(),
        total: values.len(),
        unique,
        numeric,
    })
}

impl fmt::Display for ColumnStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats for column '{}':", self.column)?;
        writeln!(f, "  Total values:  {}", self.total)?;
        write!(f, "  Unique values: {}", self.unique)?;
        match &self.numeric {
            Some(summary) => {
                writeln!(f)?;
                writeln!(f, "  Min:           {:?}", summary.min)?;
                writeln!(f, "  Max:           {:?}", summary.max)?;
                write!(f, "  Average:       {:.2}", summary.rounded_average())
            }
            None => {
                writeln!(f)?;
                write!(f, "  Values are non-numeric, skipping min/max/average.")
            }
        }
    }
}
