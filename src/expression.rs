//! Predicate model for row filtering.
//!
//! This module provides:
//! - The comparison operator vocabulary and AND/OR logic modes
//! - The numeric fallback comparison rule
//! - Conditions and the boxed row predicates built from them
//! - The outcome taxonomy shared by every query operation

pub mod compare;
pub mod error;
pub mod operator;
pub mod predicate;

pub use compare::{compare_with_fallback, normalize, parse_all_numbers, parse_number, TextFolding};
pub use error::{QueryError, QueryResult};
pub use operator::{ComparisonOperator, LogicMode};
pub use predicate::{
    collect_conditions, collect_equality_conditions, combine, Condition, EqualityCondition,
    RowPredicate,
};
