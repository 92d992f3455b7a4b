//! A single record: column name to cell text.

use std::collections::HashMap;

/// One record of a table. Cells hold the text exactly as read; a column
/// absent from the source line is absent here rather than empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    /// Build a row from (column, value) pairs. A repeated column keeps the
    /// last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lookup() {
        let row = Row::from_pairs([("name", "Al"), ("age", "30")]);
        assert_eq!(row.get("name"), Some("Al"));
        assert_eq!(row.get("Name"), None);
        assert!(row.contains("age"));
        assert!(!row.contains("city"));
    }

    #[test]
    fn test_repeated_column_keeps_last() {
        let row = Row::from_pairs([("a", "1"), ("a", "2")]);
        assert_eq!(row.get("a"), Some("2"));
        assert_eq!(row, Row::from_pairs([("a", "2")]));
    }

    #[test]
    fn test_empty_row() {
        let row = Row::default();
        assert!(!row.contains("a"));
        assert_eq!(row.get("a"), None);
    }
}
