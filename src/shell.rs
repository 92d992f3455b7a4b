//! Interactive menu loop.
//!
//! The shell owns the [`Session`] and threads every query result through
//! it. Typing `exit` at any prompt cancels the current action; at the menu
//! prompt it leaves the shell.

use crate::config::Config;
use crate::executor::{
    column_stats, filter_advanced, filter_all, filter_equals, filter_operator, list_columns, sort,
    unique_values, SortOrder,
};
use crate::expression::{ComparisonOperator, Condition, EqualityCondition, QueryError};
use crate::format::{render_grid, render_numbered, render_row};
use crate::session::Session;
use crate::storage::{export_path, write_table};
use crate::table::{resolve_column, resolve_first_row_column, ColumnMap, Table};
use anyhow::{Context, Result};
use log::debug;
use std::io::{BufRead, Write};

const MENU: &str = "
What do you want to do?
1. Filter data (single)
2. List columns
3. Show unique values for a column
4. Show all rows
5. Filter data (multiple)
6. Export working data
7. Filter data (with operators)
8. Advanced multi-condition filter (AND/OR)
9. Sort data
10. Exit
11. Reset working data
12. Column statistics";

/// Interactive shell over any line reader and writer
pub struct Shell<R, W> {
    input: R,
    output: W,
    session: Session,
    config: Config,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, session: Session, config: Config) -> Self {
        Self {
            input,
            output,
            session,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        self.greet()?;
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice (or 'exit' to cancel): ")? else {
                writeln!(self.output, "Bye... Exiting...")?;
                break;
            };
            debug!("Menu choice '{}'", choice);
            match choice.trim() {
                "1" => self.filter_single()?,
                "2" => self.list_columns()?,
                "3" => self.unique_values()?,
                "4" => self.show_rows()?,
                "5" => self.filter_multiple()?,
                "6" => self.export()?,
                "7" => self.filter_with_operator()?,
                "8" => self.filter_advanced()?,
                "9" => self.sort()?,
                "10" => {
                    writeln!(self.output, "Bye... Exiting...")?;
                    break;
                }
                "11" => {
                    self.session.reset();
                    writeln!(self.output, "Working data reset to full dataset.")?;
                }
                "12" => self.stats()?,
                _ => writeln!(self.output, "ERROR: Invalid choice. Please try again.")?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn greet(&mut self) -> Result<()> {
        let table = self.session.working();
        let mut text = format!("Loaded file. Total rows: {}\n", table.len());
        if let Some(row) = table.first_row() {
            text.push_str(&format!("Sample row: {}\n", render_row(table.header(), row)));
        }
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Read one answer. `None` when the user typed `exit` or input ended.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        if answer.trim().eq_ignore_ascii_case("exit") {
            writeln!(self.output, "Cancelled by user.")?;
            return Ok(None);
        }
        Ok(Some(answer))
    }

    fn report(&mut self, err: &QueryError) -> Result<()> {
        if err.is_warning() {
            writeln!(self.output, "Warning: {}.", err)?;
        } else {
            writeln!(self.output, "ERROR: {}.", err)?;
        }
        Ok(())
    }

    /// Thread a filter result through the session and print the outcome.
    fn show_filtered(&mut self, result: Result<Table, QueryError>, heading: &str) -> Result<()> {
        match self.session.apply(result) {
            Ok(table) => {
                let text = format!(
                    "\nFound {} matching rows{}:\n\n{}",
                    table.len(),
                    heading,
                    render_grid(table, None)
                );
                self.output.write_all(text.as_bytes())?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn filter_single(&mut self) -> Result<()> {
        let Some(column) = self.prompt("Enter column to filter by (or 'exit' to cancel): ")? else {
            return Ok(());
        };
        let Some(value) = self.prompt("Enter value to match (or 'exit' to cancel): ")? else {
            return Ok(());
        };
        let result = filter_equals(self.session.working(), &column, &value);
        self.show_filtered(result, "")
    }

    fn filter_multiple(&mut self) -> Result<()> {
        if self.session.working().is_empty() {
            return self.report(&QueryError::NoData);
        }
        let mut conditions = Vec::new();
        loop {
            let Some(column) = self.prompt("Enter column to filter (or 'done' to apply filters): ")?
            else {
                break;
            };
            if column.eq_ignore_ascii_case("done") {
                break;
            }
            let Some(resolved) = resolve_column(self.session.working(), &column).map(str::to_string)
            else {
                self.report(&QueryError::ColumnNotFound(column))?;
                continue;
            };
            let Some(value) = self.prompt(&format!("Enter value for '{}': ", resolved))? else {
                break;
            };
            conditions.push(EqualityCondition::new(resolved, value));
        }
        let result = filter_all(self.session.working(), &conditions);
        self.show_filtered(result, " with all conditions")
    }

    fn filter_with_operator(&mut self) -> Result<()> {
        if self.session.working().is_empty() {
            return self.report(&QueryError::NoData);
        }
        let Some(column) = self.prompt("Enter column to filter by (or 'exit' to cancel): ")? else {
            return Ok(());
        };
        if resolve_first_row_column(self.session.working(), &column).is_none() {
            return self.report(&QueryError::ColumnNotFound(column.trim().to_string()));
        }
        let prompt = format!("Enter operator ({}): ", ComparisonOperator::symbols());
        let Some(symbol) = self.prompt(&prompt)? else {
            return Ok(());
        };
        if let Err(e) = ComparisonOperator::from_symbol(&symbol) {
            return self.report(&e);
        }
        let Some(value) = self.prompt("Enter value to compare against: ")? else {
            return Ok(());
        };
        let result = filter_operator(self.session.working(), &column, &symbol, &value);
        self.show_filtered(result, "")
    }

    fn filter_advanced(&mut self) -> Result<()> {
        if self.session.working().is_empty() {
            return self.report(&QueryError::NoData);
        }
        let columns = ColumnMap::from_first_row(self.session.working());
        let operator_prompt = format!("Enter operator ({}): ", ComparisonOperator::symbols());
        let mut conditions = Vec::new();
        loop {
            let Some(column) = self.prompt("Enter column (or 'done' to apply filters): ")? else {
                break;
            };
            if column.eq_ignore_ascii_case("done") {
                break;
            }
            let Some(resolved) = columns.resolve(&column).map(str::to_string) else {
                self.report(&QueryError::ColumnNotFound(column.trim().to_lowercase()))?;
                continue;
            };
            let Some(symbol) = self.prompt(&operator_prompt)? else {
                break;
            };
            let operator = match ComparisonOperator::from_symbol(&symbol) {
                Ok(operator) => operator,
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };
            let Some(value) = self.prompt("Enter value to compare with: ")? else {
                break;
            };
            conditions.push(Condition::new(resolved, operator, value));
        }
        if conditions.is_empty() {
            return self.report(&QueryError::NoConditions);
        }
        let Some(logic) = self.prompt("Use 'AND' or 'OR' between conditions? ")? else {
            return Ok(());
        };
        let result = filter_advanced(self.session.working(), &conditions, &logic);
        self.show_filtered(result, "")
    }

    fn sort(&mut self) -> Result<()> {
        if self.session.working().is_empty() {
            return self.report(&QueryError::NoData);
        }
        let Some(column) = self.prompt("Enter column to sort by (or 'exit' to cancel): ")? else {
            return Ok(());
        };
        if ColumnMap::from_first_row(self.session.working())
            .resolve(&column)
            .is_none()
        {
            return self.report(&QueryError::ColumnNotFound(column.trim().to_lowercase()));
        }
        let Some(order) =
            self.prompt("Enter 'asc' for ascending or 'desc' for descending (default is asc): ")?
        else {
            return Ok(());
        };
        let order = SortOrder::from_input(&order);
        let result = sort(self.session.working(), &column, order);
        let limit = self.config.row_limit;
        match self.session.apply(result) {
            Ok(table) => {
                let text = format!(
                    "\nSorted data by column '{}' ({}):\n{}",
                    column.trim(),
                    order,
                    render_numbered(table, limit)
                );
                self.output.write_all(text.as_bytes())?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn list_columns(&mut self) -> Result<()> {
        match list_columns(self.session.working()) {
            Ok(columns) => {
                writeln!(self.output, "\nColumns available in the file:")?;
                for column in columns {
                    writeln!(self.output, " - {}", column)?;
                }
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn unique_values(&mut self) -> Result<()> {
        let Some(column) = self.prompt("Enter column to inspect: ")? else {
            return Ok(());
        };
        let working = self.session.working();
        let heading = resolve_column(working, &column).unwrap_or(column.as_str()).to_string();
        match unique_values(working, &column) {
            Ok(values) => {
                writeln!(self.output, "\nUnique values in '{}':", heading)?;
                for value in values {
                    writeln!(self.output, " - {}", value)?;
                }
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn stats(&mut self) -> Result<()> {
        let Some(column) = self.prompt("Enter column to show stats for: ")? else {
            return Ok(());
        };
        match column_stats(self.session.working(), &column) {
            Ok(stats) => writeln!(self.output, "{}", stats)?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn show_rows(&mut self) -> Result<()> {
        let table = self.session.working();
        if table.is_empty() {
            return self.report(&QueryError::NoData);
        }
        let text = format!(
            "\nShowing up to {} rows:\n\n{}",
            self.config.row_limit,
            render_numbered(table, self.config.row_limit)
        );
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        if self.session.working().is_empty() {
            return self.report(&QueryError::NoData);
        }
        let Some(name) = self.prompt("Enter filename to export (e.g., output.csv): ")? else {
            return Ok(());
        };
        let path = export_path(name.trim());
        if path.exists() && !self.config.force_overwrite {
            let question = format!("File '{}' already exists. Overwrite? (y/n): ", path.display());
            let confirmed = self
                .prompt(&question)?
                .map_or(false, |answer| answer.trim().eq_ignore_ascii_case("y"));
            if !confirmed {
                writeln!(self.output, "Export cancelled.")?;
                return Ok(());
            }
        }
        match write_table(&path, self.session.working()) {
            Ok(()) => writeln!(self.output, "Data exported successfully to '{}'.", path.display())?,
            Err(e) => writeln!(self.output, "Failed to export: {:#}", e)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn people() -> Table {
        Table::from_records(
            &["name", "age", "city"],
            &[
                &["Al", "30", "Oslo"],
                &["Bo", "25", "Bergen"],
                &["Cy", "30", "Oslo"],
            ],
        )
    }

    fn run_script(script: &str) -> (Session, String) {
        let mut output = Vec::new();
        let mut shell = Shell::new(
            Cursor::new(script.to_string()),
            &mut output,
            Session::new(people()),
            Config::default(),
        );
        shell.run().unwrap();
        let session = shell.session().clone();
        drop(shell);
        (session, String::from_utf8(output).unwrap())
    }

    fn names(table: &Table) -> Vec<&str> {
        table.iter().map(|row| row.get("name").unwrap_or("")).collect()
    }

    #[test]
    fn test_exit_and_end_of_input() {
        let (_, out) = run_script("10\n");
        assert!(out.contains("Loaded file. Total rows: 3"));
        assert!(out.ends_with("Bye... Exiting...\n"));

        let (session, out) = run_script("");
        assert!(out.contains("Bye... Exiting..."));
        assert_eq!(session.working().len(), 3);
    }

    #[test]
    fn test_single_filter_replaces_working_table() {
        let (session, out) = run_script("1\nAGE\n30\n10\n");
        assert_eq!(names(session.working()), vec!["Al", "Cy"]);
        assert!(out.contains("Found 2 matching rows:"));
        assert!(out.contains("| Cy   |  30 | Oslo |"));
    }

    #[test]
    fn test_empty_match_keeps_working_table() {
        let (session, out) = run_script("1\nname\nZed\n10\n");
        assert_eq!(session.working().len(), 3);
        assert!(out.contains("Warning: No matching records found."));
    }

    #[test]
    fn test_chained_filters_and_reset() {
        let (session, _) = run_script("1\ncity\noslo\n7\nname\n!=\nAl\n10\n");
        assert_eq!(names(session.working()), vec!["Cy"]);

        let (session, out) = run_script("1\ncity\noslo\n11\n10\n");
        assert_eq!(session.working().len(), 3);
        assert!(out.contains("Working data reset to full dataset."));
    }

    #[test]
    fn test_multi_filter_skips_unknown_columns() {
        let (session, out) = run_script("5\nzip\ncity\noslo\nAGE\n30\ndone\n10\n");
        assert!(out.contains("ERROR: Column 'zip' not found."));
        assert!(out.contains("Found 2 matching rows with all conditions:"));
        assert_eq!(names(session.working()), vec!["Al", "Cy"]);
    }

    #[test]
    fn test_operator_filter_invalid_operator() {
        let (session, out) = run_script("7\nage\n=>\n10\n");
        assert!(out.contains("ERROR: Invalid operator '=>'"));
        assert_eq!(session.working().len(), 3);
    }

    #[test]
    fn test_advanced_filter_or() {
        let script = "8\nname\n==\nbo\nage\n>\n29\ncity\n==\nnowhere\ndone\nor\n10\n";
        let (session, _) = run_script(script);
        assert_eq!(names(session.working()), vec!["Al", "Bo", "Cy"]);

        let script = "8\nname\n==\nbo\nage\n>\n29\ndone\nand\n10\n";
        let (session, out) = run_script(script);
        assert_eq!(session.working().len(), 3);
        assert!(out.contains("Warning: No matching records found."));
    }

    #[test]
    fn test_advanced_filter_outcomes() {
        let (_, out) = run_script("8\ndone\n10\n");
        assert!(out.contains("Warning: No valid conditions provided."));

        let (session, out) = run_script("8\nage\n>\n1\ndone\nxor\n10\n");
        assert!(out.contains("ERROR: Invalid logic mode 'xor'"));
        assert_eq!(session.working().len(), 3);
    }

    #[test]
    fn test_sort_descending() {
        let (session, out) = run_script("9\nage\ndesc\n10\n");
        assert_eq!(names(session.working()), vec!["Al", "Cy", "Bo"]);
        assert!(out.contains("Sorted data by column 'age' (descending):"));
        assert!(out.contains("1. name: Al, age: 30, city: Oslo"));
    }

    #[test]
    fn test_cancel_with_exit() {
        let (session, out) = run_script("9\nexit\n1\ncity\nEXIT\n10\n");
        assert_eq!(session.working().len(), 3);
        assert_eq!(out.matches("Cancelled by user.").count(), 2);
    }

    #[test]
    fn test_reports() {
        let (_, out) = run_script("2\n3\ncity\n12\nage\n42\n10\n");
        assert!(out.contains(" - name\n - age\n - city\n"));
        assert!(out.contains(" - Bergen\n - Oslo\n"));
        assert!(out.contains("Average:       28.33"));
        assert!(out.contains("ERROR: Invalid choice."));
    }

    #[test]
    fn test_unique_values_heading_uses_column_name() {
        let (_, out) = run_script("3\nCITY\n10\n");
        assert!(out.contains("Unique values in 'city':"));
    }

    #[test]
    fn test_export_and_overwrite_prompt() -> Result<()> {
        let dir = tempdir()?;
        let base = dir.path().join("people");
        let base = base.to_str().unwrap();

        let (_, out) = run_script(&format!("1\ncity\nbergen\n6\n{}\n10\n", base));
        assert!(out.contains("Data exported successfully"));
        let written = std::fs::read_to_string(format!("{}.csv", base))?;
        assert_eq!(written, "name,age,city\r\nBo,25,Bergen\r\n");

        let (_, out) = run_script(&format!("6\n{}.csv\nn\n10\n", base));
        assert!(out.contains("Export cancelled."));
        let unchanged = std::fs::read_to_string(format!("{}.csv", base))?;
        assert_eq!(unchanged, written);
        Ok(())
    }
}
