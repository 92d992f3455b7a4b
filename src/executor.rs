//! Query operations over in-memory tables.
//!
//! Every operation is a pure function from an input [`Table`](crate::table::Table)
//! (plus parameters) to either a new table, a report, or a
//! [`QueryError`](crate::expression::QueryError). Nothing here keeps state
//! between calls or touches the filesystem.

pub mod filter;
pub mod sort;
pub mod stats;

pub use filter::{filter_advanced, filter_all, filter_equals, filter_operator};
pub use sort::{sort, SortKeyKind, SortOrder};
pub use stats::{column_stats, list_columns, unique_values, ColumnStats, NumericSummary};
