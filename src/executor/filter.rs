//! Filter operations.
//!
//! Each filter reads an input table and returns a new table holding the
//! matching rows, or a [`QueryError`] describing why there is nothing to
//! return. The input table is never modified.

use crate::expression::{
    combine, compare_with_fallback, Condition, ComparisonOperator, EqualityCondition, LogicMode,
    QueryError, QueryResult, RowPredicate, TextFolding,
};
use crate::table::{resolve_column, resolve_first_row_column, Table};
use log::debug;

/// Keep rows whose cell equals `value`, ignoring case.
///
/// The column resolves against the header. A missing cell compares as the
/// empty string.
pub fn filter_equals(table: &Table, column: &str, value: &str) -> QueryResult<Table> {
    if table.is_empty() {
        return Err(QueryError::NoData);
    }
    let column = resolve_column(table, column)
        .ok_or_else(|| QueryError::ColumnNotFound(column.to_string()))?
        .to_string();
    let wanted = value.to_lowercase();
    let predicate: RowPredicate =
        Box::new(move |row| row.get(&column).unwrap_or("").to_lowercase() == wanted);
    retain(table, &predicate)
}

/// Keep rows matching every equality condition.
///
/// Conditions must already be resolved (see
/// [`collect_equality_conditions`](crate::expression::collect_equality_conditions)).
pub fn filter_all(table: &Table, conditions: &[EqualityCondition]) -> QueryResult<Table> {
    if table.is_empty() {
        return Err(QueryError::NoData);
    }
    if conditions.is_empty() {
        return Err(QueryError::NoConditions);
    }
    let predicates = conditions.iter().map(EqualityCondition::to_predicate).collect();
    retain(table, &combine(predicates, LogicMode::And))
}

/// Keep rows where `cell <op> value` holds.
///
/// The column resolves against the first row's columns only. Cells and
/// value are compared as numbers when both parse, otherwise as text exactly
/// as stored, with no case folding. Rows missing the cell are dropped.
pub fn filter_operator(
    table: &Table,
    column: &str,
    symbol: &str,
    value: &str,
) -> QueryResult<Table> {
    if table.is_empty() {
        return Err(QueryError::NoData);
    }
    let column = resolve_first_row_column(table, column)
        .ok_or_else(|| QueryError::ColumnNotFound(column.trim().to_string()))?
        .to_string();
    let operator = ComparisonOperator::from_symbol(symbol)?;
    debug!("Operator filter: {} {} {}", column, operator, value);

    let value = value.to_string();
    let predicate: RowPredicate = Box::new(move |row| match row.get(&column) {
        Some(cell) => compare_with_fallback(operator, cell, &value, TextFolding::Exact),
        None => false,
    });
    retain(table, &predicate)
}

/// Keep rows where the conditions hold, combined with AND or OR.
///
/// `logic` is parsed case-insensitively. Zero conditions is reported before
/// an unrecognised logic mode.
pub fn filter_advanced(table: &Table, conditions: &[Condition], logic: &str) -> QueryResult<Table> {
    if table.is_empty() {
        return Err(QueryError::NoData);
    }
    if conditions.is_empty() {
        return Err(QueryError::NoConditions);
    }
    let logic = LogicMode::parse(logic)?;
    debug!(
        "Advanced filter with {} conditions joined by {}",
        conditions.len(),
        logic
    );
    let predicates = conditions.iter().map(Condition::to_predicate).collect();
    retain(table, &combine(predicates, logic))
}

fn retain(table: &Table, predicate: &RowPredicate) -> QueryResult<Table> {
    let rows: Vec<_> = table.iter().filter(|row| predicate(*row)).cloned().collect();
    debug!("Filter kept {} of {} rows", rows.len(), table.len());
    if rows.is_empty() {
        return Err(QueryError::EmptyMatch);
    }
    Ok(table.with_rows(rows))
}
