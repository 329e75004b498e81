//! Delimited tables
//!
//! A [`Table`] is a header plus rows of rendered cells, every row as wide
//! as the header. Tables are written with the `csv` crate and the output
//! file is truncated on every write.

use crate::flatten::FlattenedRecord;
use crate::stats::StatDictionary;
use std::collections::HashSet;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Column names of the exported stat table
pub const STAT_TABLE_HEADER: [&str; 2] = ["stat_id", "stat_name"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// One row per record, in input order; absent fields become empty cells
    pub fn from_records(records: &[FlattenedRecord], headers: Vec<String>) -> Self {
        let rows = records
            .iter()
            .map(|record| headers.iter().map(|h| record.cell(h)).collect())
            .collect();
        Self { headers, rows }
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), TableError> {
        if row.len() != self.headers.len() {
            return Err(TableError::RowWidth {
                row: self.rows.len(),
                expected: self.headers.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of a column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// New table holding only the given columns, in the given order
    pub fn select(&self, indices: &[usize]) -> Table {
        Table {
            headers: indices.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    /// Write header and rows. A table without columns writes nothing.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), TableError> {
        if self.headers.is_empty() {
            return Ok(());
        }

        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the table to `path`, replacing any existing file
    pub fn write_csv(&self, path: &Path) -> Result<(), TableError> {
        let file = std::fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))
    }

    pub fn read_from<R: io::Read>(reader: R) -> Result<Table, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut table = Table::new(rdr.headers()?.iter());
        for record in rdr.records() {
            let record = record?;
            table.push_row(record.iter().map(String::from).collect())?;
        }
        Ok(table)
    }

    pub fn read_csv(path: &Path) -> Result<Table, TableError> {
        let file = std::fs::File::open(path)?;
        Self::read_from(io::BufReader::new(file))
    }
}

/// Header for the weapon table.
///
/// Keys of the first record, then every stat name the dictionary knows
/// (most never appear on a weapon), then keys only seen on later records.
/// Columns that end up empty are removed by the postprocessor.
pub fn weapon_header(records: &[FlattenedRecord], dictionary: &StatDictionary) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut header = Vec::new();

    let first = records.first().into_iter().flat_map(|r| r.keys());
    let later = records.iter().skip(1).flat_map(|r| r.keys());

    for name in first.chain(dictionary.names()).chain(later) {
        if seen.insert(name) {
            header.push(name.to_string());
        }
    }
    header
}

/// Two-column stat_id/stat_name table, ordered by stat ID
pub fn stat_table(dictionary: &StatDictionary) -> Table {
    Table {
        headers: STAT_TABLE_HEADER.iter().map(|h| h.to_string()).collect(),
        rows: dictionary
            .iter()
            .map(|(id, name)| vec![id.to_string(), name.to_string()])
            .collect(),
    }
}
