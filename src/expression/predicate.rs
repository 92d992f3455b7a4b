//! Conditions and the row predicates built from them.

use crate::expression::compare::{compare_with_fallback, normalize, TextFolding};
use crate::expression::{ComparisonOperator, LogicMode, QueryError};
use crate::table::{resolve_column, ColumnMap, Row, Table};
use log::warn;

/// Type alias for row predicate functions
pub type RowPredicate = Box<dyn Fn(&Row) -> bool + Send + 'static>;

/// Exact, case-insensitive match of one column against one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityCondition {
    /// Canonical column name
    pub column: String,
    pub value: String,
}

impl EqualityCondition {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// A row matches when the cell is present, non-empty, and equal to the
    /// value after trimming and lowercasing both.
    pub fn to_predicate(&self) -> RowPredicate {
        let column = self.column.clone();
        let wanted = normalize(&self.value);
        Box::new(move |row| match row.get(&column) {
            Some(cell) if !cell.is_empty() => normalize(cell) == wanted,
            _ => false,
        })
    }
}

/// (column, operator, value) comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Canonical column name
    pub column: String,
    pub operator: ComparisonOperator,
    pub value: String,
}

impl Condition {
    pub fn new(
        column: impl Into<String>,
        operator: ComparisonOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    /// Build a predicate that owns its own copy of this condition.
    ///
    /// A missing cell evaluates to false. Otherwise the numeric fallback rule
    /// applies, with trimmed, lowercased text on the fallback path.
    pub fn to_predicate(&self) -> RowPredicate {
        let Condition {
            column,
            operator,
            value,
        } = self.clone();
        Box::new(move |row| match row.get(&column) {
            Some(cell) => compare_with_fallback(operator, cell, &value, TextFolding::Normalized),
            None => false,
        })
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator, self.value)
    }
}

/// Reduce several predicates to one with AND or OR.
///
/// With AND an empty list accepts every row; with OR it rejects every row.
pub fn combine(predicates: Vec<RowPredicate>, logic: LogicMode) -> RowPredicate {
    match logic {
        LogicMode::And => Box::new(move |row| predicates.iter().all(|p| p(row))),
        LogicMode::Or => Box::new(move |row| predicates.iter().any(|p| p(row))),
    }
}

/// Resolve user (column, value) pairs into equality conditions.
///
/// Columns resolve against the header. Pairs whose column does not resolve
/// are skipped and returned as `ColumnNotFound` so each can be reported.
pub fn collect_equality_conditions<'a, I>(
    table: &Table,
    pairs: I,
) -> (Vec<EqualityCondition>, Vec<QueryError>)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut conditions = Vec::new();
    let mut rejected = Vec::new();
    for (column, value) in pairs {
        match resolve_column(table, column) {
            Some(resolved) => conditions.push(EqualityCondition::new(resolved, value)),
            None => {
                warn!("Skipping condition on unknown column '{}'", column);
                rejected.push(QueryError::ColumnNotFound(column.to_string()));
            }
        }
    }
    (conditions, rejected)
}

/// Resolve user (column, operator, value) triples into conditions.
///
/// Columns resolve through a [`ColumnMap`] of the first row. A triple with
/// an unknown column or an invalid operator symbol is skipped and returned
/// as the matching error.
pub fn collect_conditions<'a, I>(table: &Table, triples: I) -> (Vec<Condition>, Vec<QueryError>)
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
{
    let columns = ColumnMap::from_first_row(table);
    let mut conditions = Vec::new();
    let mut rejected = Vec::new();
    for (column, symbol, value) in triples {
        let Some(resolved) = columns.resolve(column) else {
            warn!("Skipping condition on unknown column '{}'", column);
            rejected.push(QueryError::ColumnNotFound(column.trim().to_lowercase()));
            continue;
        };
        match ComparisonOperator::from_symbol(symbol) {
            Ok(operator) => conditions.push(Condition::new(resolved, operator, value)),
            Err(e) => {
                warn!("Skipping condition on '{}': {}", resolved, e);
                rejected.push(e);
            }
        }
    }
    (conditions, rejected)
}
