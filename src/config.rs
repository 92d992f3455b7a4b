//! Runtime settings shared by the shell and batch mode.

/// Rows shown by listings unless told otherwise
pub const DEFAULT_ROW_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum rows printed by numbered listings
    pub row_limit: usize,
    /// Replace existing export files without asking
    pub force_overwrite: bool,
    /// Print batch results as JSON instead of text
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            row_limit: DEFAULT_ROW_LIMIT,
            force_overwrite: false,
            json: false,
        }
    }
}

impl Config {
    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}
