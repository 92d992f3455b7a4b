//! The caller-held working table.

use crate::expression::QueryResult;
use crate::table::Table;
use log::debug;

/// Holds the table loaded at startup and the current working table.
///
/// Query operations never touch a session. Their results are handed to
/// [`Session::apply`], which replaces the working table only on success.
#[derive(Debug, Clone)]
pub struct Session {
    original: Table,
    working: Table,
}

impl Session {
    pub fn new(table: Table) -> Self {
        Self {
            working: table.clone(),
            original: table,
        }
    }

    pub fn working(&self) -> &Table {
        &self.working
    }

    pub fn original(&self) -> &Table {
        &self.original
    }

    /// Make a successful result the new working table. On error the working
    /// table is left as it was and the error is passed through.
    pub fn apply(&mut self, result: QueryResult<Table>) -> QueryResult<&Table> {
        let table = result?;
        debug!(
            "Working table replaced: {} -> {} rows",
            self.working.len(),
            table.len()
        );
        self.working = table;
        Ok(&self.working)
    }

    /// Go back to the table loaded at startup.
    pub fn reset(&mut self) {
        self.working = self.original.clone();
    }
}
