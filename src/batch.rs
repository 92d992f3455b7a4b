//! One-shot commands run from the command line.

use crate::config::Config;
use crate::executor::{
    column_stats, filter_advanced, filter_all, filter_equals, filter_operator, list_columns, sort,
    unique_values, SortOrder,
};
use crate::expression::{collect_conditions, collect_equality_conditions, QueryError};
use crate::format::{render_grid, render_numbered};
use crate::storage::write_table;
use crate::table::Table;
use anyhow::{bail, Result};
use log::debug;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// A single query requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Columns,
    Unique {
        column: String,
    },
    Stats {
        column: String,
    },
    Filter {
        column: String,
        value: String,
    },
    FilterMulti {
        pairs: Vec<(String, String)>,
    },
    FilterOp {
        column: String,
        operator: String,
        value: String,
    },
    Where {
        triples: Vec<(String, String, String)>,
        logic: String,
    },
    Sort {
        column: String,
        order: SortOrder,
    },
}

impl Command {
    /// Whether the command yields a table that can be exported
    pub fn produces_table(&self) -> bool {
        !matches!(
            self,
            Command::Columns | Command::Unique { .. } | Command::Stats { .. }
        )
    }
}

/// Reject an export request for a command that only prints a report.
pub fn check_export(command: &Command, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        if !command.produces_table() {
            bail!(
                "Cannot export to '{}': the query prints a report, not a table",
                path.display()
            );
        }
    }
    Ok(())
}

/// Write a command's result table to `path`.
///
/// A failed query leaves nothing to write and is reported as such. An
/// existing file is only replaced when the config allows overwriting.
pub fn export<W: Write>(
    result: Option<&Table>,
    path: &Path,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let Some(table) = result else {
        writeln!(out, "Nothing exported to '{}'.", path.display())?;
        return Ok(());
    };
    if path.exists() && !config.force_overwrite {
        bail!(
            "File '{}' already exists (use --force to overwrite)",
            path.display()
        );
    }
    write_table(path, table)?;
    writeln!(out, "Data exported successfully to '{}'.", path.display())?;
    Ok(())
}

/// Run a command against `table`, printing its result to `out`.
///
/// Query errors are printed and yield `Ok(None)`. Commands that produce a
/// table return it so the caller can export it.
pub fn run<W: Write>(
    command: &Command,
    table: &Table,
    config: &Config,
    out: &mut W,
) -> Result<Option<Table>> {
    debug!("Batch command {:?}", command);
    let result = match command {
        Command::Columns => {
            return report_value(list_columns(table), config, out, |columns, out| {
                for column in columns {
                    writeln!(out, " - {}", column)?;
                }
                Ok(())
            })
        }
        Command::Unique { column } => {
            return report_value(unique_values(table, column), config, out, |values, out| {
                for value in values {
                    writeln!(out, " - {}", value)?;
                }
                Ok(())
            })
        }
        Command::Stats { column } => {
            return report_value(column_stats(table, column), config, out, |stats, out| {
                writeln!(out, "{}", stats)?;
                Ok(())
            })
        }
        Command::Filter { column, value } => filter_equals(table, column, value),
        Command::FilterMulti { pairs } => {
            let (conditions, rejected) = collect_equality_conditions(
                table,
                pairs.iter().map(|(c, v)| (c.as_str(), v.as_str())),
            );
            if !rejected.is_empty() {
                for err in &rejected {
                    print_error(out, err)?;
                }
                return Ok(None);
            }
            filter_all(table, &conditions)
        }
        Command::FilterOp {
            column,
            operator,
            value,
        } => filter_operator(table, column, operator, value),
        Command::Where { triples, logic } => {
            let (conditions, rejected) = collect_conditions(
                table,
                triples
                    .iter()
                    .map(|(c, o, v)| (c.as_str(), o.as_str(), v.as_str())),
            );
            for err in &rejected {
                print_error(out, err)?;
            }
            filter_advanced(table, &conditions, logic)
        }
        Command::Sort { column, order } => sort(table, column, *order),
    };

    match result {
        Ok(result) => {
            if config.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
            } else if matches!(command, Command::Sort { .. }) {
                write!(out, "{}", render_numbered(&result, config.row_limit))?;
            } else {
                writeln!(out, "Found {} matching rows:\n", result.len())?;
                write!(out, "{}", render_grid(&result, None))?;
            }
            Ok(Some(result))
        }
        Err(err) => {
            print_error(out, &err)?;
            Ok(None)
        }
    }
}

fn report_value<T, W, F>(
    result: Result<T, QueryError>,
    config: &Config,
    out: &mut W,
    render: F,
) -> Result<Option<Table>>
where
    T: Serialize,
    W: Write,
    F: FnOnce(T, &mut W) -> Result<()>,
{
    match result {
        Ok(value) if config.json => writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?,
        Ok(value) => render(value, out)?,
        Err(err) => print_error(out, &err)?,
    }
    Ok(None)
}

fn print_error<W: Write>(out: &mut W, err: &QueryError) -> Result<()> {
    if err.is_warning() {
        writeln!(out, "Warning: {}.", err)?;
    } else {
        writeln!(out, "ERROR: {}.", err)?;
    }
    Ok(())
}
