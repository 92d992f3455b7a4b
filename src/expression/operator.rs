//! Operator definitions for conditions.

use crate::expression::{QueryError, QueryResult};
use std::fmt;
use std::str::FromStr;

/// Comparison operators accepted at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl ComparisonOperator {
    /// Every operator, in the order they are offered to users
    pub const ALL: [ComparisonOperator; 6] = [
        ComparisonOperator::Eq,
        ComparisonOperator::Ne,
        ComparisonOperator::Gt,
        ComparisonOperator::Lt,
        ComparisonOperator::Ge,
        ComparisonOperator::Le,
    ];

    /// Parse an operator token. The token must match exactly; surrounding
    /// whitespace is not tolerated.
    pub fn from_symbol(symbol: &str) -> QueryResult<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == symbol)
            .ok_or_else(|| QueryError::InvalidOperator(symbol.to_string()))
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "==",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Ge => ">=",
            ComparisonOperator::Le => "<=",
        }
    }

    /// Apply the operator to two operands.
    ///
    /// Uses the operand type's own comparison operators, so for floats a NaN
    /// operand is unequal to everything and never ordered.
    pub fn apply<T: PartialOrd + ?Sized>(&self, left: &T, right: &T) -> bool {
        match self {
            ComparisonOperator::Eq => left == right,
            ComparisonOperator::Ne => left != right,
            ComparisonOperator::Gt => left > right,
            ComparisonOperator::Lt => left < right,
            ComparisonOperator::Ge => left >= right,
            ComparisonOperator::Le => left <= right,
        }
    }

    /// Comma-separated list of every symbol, for prompts and messages
    pub fn symbols() -> String {
        Self::ALL
            .iter()
            .map(|op| op.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ComparisonOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        Self::from_symbol(s)
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How per-condition results combine into row inclusion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicMode {
    And,
    Or,
}

impl LogicMode {
    /// Parse "and"/"or" in any case, ignoring surrounding whitespace.
    pub fn parse(mode: &str) -> QueryResult<Self> {
        match mode.trim().to_lowercase().as_str() {
            "and" => Ok(LogicMode::And),
            "or" => Ok(LogicMode::Or),
            _ => Err(QueryError::InvalidLogicMode(mode.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicMode::And => "AND",
            LogicMode::Or => "OR",
        }
    }
}

impl fmt::Display for LogicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
