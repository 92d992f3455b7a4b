//! csvsift - filter, sort and inspect delimited files from the terminal

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser as ClapParser};
use csvsift::batch::{self, Command};
use csvsift::config::{Config, DEFAULT_ROW_LIMIT};
use csvsift::executor::SortOrder;
use csvsift::session::Session;
use csvsift::shell::Shell;
use csvsift::storage::read_table;
use std::io;
use std::path::PathBuf;

/// csvsift - load a delimited file and filter, sort, inspect or export it
///
/// Without a query flag an interactive menu is started.
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Delimited file to load (first line is the header)
    file: PathBuf,

    /// Show statistics for a column
    #[arg(long, value_name = "COLUMN", group = "query")]
    stats: Option<String>,

    /// Keep rows whose column equals the value, ignoring case
    #[arg(long, num_args = 2, value_names = ["COLUMN", "VALUE"], group = "query")]
    filter: Option<Vec<String>>,

    /// Keep rows matching every column/value pair
    #[arg(long, num_args = 2.., value_names = ["COLUMN", "VALUE"], group = "query")]
    filter_multi: Option<Vec<String>>,

    /// Keep rows where `COLUMN OP VALUE` holds (quote the operator)
    #[arg(
        long,
        num_args = 3,
        value_names = ["COLUMN", "OP", "VALUE"],
        allow_hyphen_values = true,
        group = "query"
    )]
    filter_op: Option<Vec<String>>,

    /// Condition for an AND/OR filter; repeat for more conditions
    #[arg(
        long = "where",
        num_args = 3,
        value_names = ["COLUMN", "OP", "VALUE"],
        action = ArgAction::Append,
        allow_hyphen_values = true,
        group = "query"
    )]
    conditions: Vec<String>,

    /// How --where conditions combine: and | or
    #[arg(long, default_value = "and")]
    logic: String,

    /// Sort by a column, optionally followed by asc or desc
    #[arg(long, num_args = 1..=2, value_names = ["COLUMN", "ORDER"], group = "query")]
    sort: Option<Vec<String>>,

    /// List the columns of the file
    #[arg(long, group = "query")]
    columns: bool,

    /// Show the distinct values of a column
    #[arg(long, value_name = "COLUMN", group = "query")]
    unique: Option<String>,

    /// Rows shown by numbered listings
    #[arg(short, long, default_value_t = DEFAULT_ROW_LIMIT)]
    limit: usize,

    /// Export the query result to this file (filter and sort queries only)
    #[arg(short, long, requires = "query")]
    output: Option<PathBuf>,

    /// Overwrite existing export files without asking
    #[arg(short, long)]
    force: bool,

    /// Print query results as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// The batch command requested, if any
    fn batch_command(&self) -> Result<Option<Command>> {
        if let Some(column) = &self.stats {
            return Ok(Some(Command::Stats {
                column: column.clone(),
            }));
        }
        if let Some([column, value]) = self.filter.as_deref() {
            return Ok(Some(Command::Filter {
                column: column.clone(),
                value: value.clone(),
            }));
        }
        if let Some(values) = &self.filter_multi {
            if values.len() % 2 != 0 {
                bail!("--filter-multi takes pairs of column and value");
            }
            let pairs = values
                .chunks(2)
                .map(|pair| (pair[0].clone(), pair[1].clone()))
                .collect();
            return Ok(Some(Command::FilterMulti { pairs }));
        }
        if let Some([column, operator, value]) = self.filter_op.as_deref() {
            return Ok(Some(Command::FilterOp {
                column: column.clone(),
                operator: operator.clone(),
                value: value.clone(),
            }));
        }
        if !self.conditions.is_empty() {
            let triples = self
                .conditions
                .chunks(3)
                .map(|c| (c[0].clone(), c[1].clone(), c[2].clone()))
                .collect();
            return Ok(Some(Command::Where {
                triples,
                logic: self.logic.clone(),
            }));
        }
        if let Some(values) = &self.sort {
            let order = values
                .get(1)
                .map_or(SortOrder::Asc, |order| SortOrder::from_input(order));
            return Ok(Some(Command::Sort {
                column: values[0].clone(),
                order,
            }));
        }
        if self.columns {
            return Ok(Some(Command::Columns));
        }
        if let Some(column) = &self.unique {
            return Ok(Some(Command::Unique {
                column: column.clone(),
            }));
        }
        Ok(None)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = Config::default()
        .with_row_limit(args.limit)
        .with_force_overwrite(args.force)
        .with_json(args.json);

    let table = read_table(&args.file).context("Failed to load input")?;
    if table.is_empty() {
        println!("Warning: '{}' has no data rows.", args.file.display());
        return Ok(());
    }

    match args.batch_command()? {
        Some(command) => {
            batch::check_export(&command, args.output.as_deref())?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let result = batch::run(&command, &table, &config, &mut out)?;
            if let Some(path) = &args.output {
                batch::export(result.as_ref(), path, &config, &mut out)?;
            }
        }
        None => {
            let stdin = io::stdin();
            let mut shell = Shell::new(stdin.lock(), io::stdout(), Session::new(table), config);
            shell.run()?;
        }
    }

    Ok(())
}
