//! Reading tables from and writing tables to delimited files.
//!
//! Parsing and serialisation live in [`crate::table`]; this module only
//! moves lines between files and tables.

use crate::table::{export_lines, load_table, Table};
use anyhow::{bail, Context, Result};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extension given to export files that lack one
pub const EXPORT_EXTENSION: &str = "csv";

/// Line terminator used when writing
pub const LINE_TERMINATOR: &str = "\r\n";

/// Load a table from a file. The first line is the header.
pub fn read_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        bail!("File '{}' does not exist", path.display());
    }
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let table = read_table_from(BufReader::new(file))
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    info!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Load a table from any buffered reader.
pub fn read_table_from<R: BufRead>(reader: R) -> Result<Table> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line.context("Failed to read header line")?,
        None => bail!("File is empty"),
    };
    let data = lines
        .collect::<std::io::Result<Vec<String>>>()
        .context("Failed to read data lines")?;
    Ok(load_table(&header, data))
}

/// Write a table to a file, replacing any existing content.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_table_to(&mut writer, table)?;
    writer.flush().context("Failed to flush export")?;
    info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Write a table as delimited lines to any writer.
pub fn write_table_to<W: Write>(writer: &mut W, table: &Table) -> Result<()> {
    for line in export_lines(table) {
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(LINE_TERMINATOR.as_bytes()))
            .context("Failed to write line")?;
    }
    Ok(())
}

/// Append the export extension to a file name that does not already end
/// with it.
pub fn export_path(name: &str) -> PathBuf {
    let suffix = format!(".{}", EXPORT_EXTENSION);
    if name.ends_with(&suffix) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}{}", name, suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_read_table_from() -> Result<()> {
        let input = Cursor::new("name,age\r\nAl,30\nBo,25\n");
        let table = read_table_from(input)?;
        assert_eq!(table.header(), &["name".to_string(), "age".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get("age"), Some("30"));
        Ok(())
    }

    #[test]
    fn test_read_header_only() -> Result<()> {
        let table = read_table_from(Cursor::new("name,age\n"))?;
        assert!(table.is_empty());
        assert_eq!(table.header().len(), 2);
        Ok(())
    }

    #[test]
    fn test_read_empty_input_fails() {
        let err = read_table_from(Cursor::new("")).unwrap_err();
        assert_eq!(err.to_string(), "File is empty");
    }

    #[test]
    fn test_read_missing_file_fails() -> Result<()> {
        let dir = tempdir()?;
        let err = read_table(&dir.path().join("absent.csv")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        Ok(())
    }

    #[test]
    fn test_write_then_read() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        let table = Table::from_records(&["name", "age"], &[&["Al", "30"], &["Bo"]]);

        write_table(&path, &table)?;
        let written = std::fs::read_to_string(&path)?;
        assert_eq!(written, "name,age\r\nAl,30\r\nBo,\r\n");

        let reloaded = read_table(&path)?;
        assert_eq!(reloaded.header(), table.header());
        assert_eq!(reloaded.rows()[0], table.rows()[0]);
        // The empty field comes back as a present, empty cell.
        assert_eq!(reloaded.rows()[1].get("age"), Some(""));
        Ok(())
    }

    #[test]
    fn test_export_path() {
        assert_eq!(export_path("out"), PathBuf::from("out.csv"));
        assert_eq!(export_path("out.csv"), PathBuf::from("out.csv"));
        assert_eq!(export_path("out.CSV"), PathBuf::from("out.CSV.csv"));
    }
}
