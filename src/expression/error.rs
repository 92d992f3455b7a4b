//! Outcome taxonomy for query operations.

use thiserror::Error;

/// Recoverable outcomes of a query. None of these is fatal: the caller
/// reports it and keeps its previous working table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("No data loaded")]
    NoData,

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Invalid operator '{0}' (use one of ==, !=, >, <, >=, <=)")]
    InvalidOperator(String),

    #[error("Invalid logic mode '{0}' (use 'AND' or 'OR')")]
    InvalidLogicMode(String),

    #[error("No valid conditions provided")]
    NoConditions,

    #[error("No matching records found")]
    EmptyMatch,
}

impl QueryError {
    /// True for outcomes that describe a valid query with nothing to show,
    /// as opposed to a mistake in the query itself.
    pub fn is_warning(&self) -> bool {
        matches!(self, QueryError::EmptyMatch | QueryError::NoConditions)
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
