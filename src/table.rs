// CSV-backed column tables for the batch flow.

use csv::{ReaderBuilder, WriterBuilder};
use log::{debug, info};
use serde::{Serialize, Deserialize};
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Column picked either by 0-based position or by header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSelector {
    Index(usize),
    Name(String),
}

impl ColumnSelector {
    pub fn resolve(&self, table: &ColumnTable) -> Result<usize> {
        match self {
            ColumnSelector::Index(index) => {
                if *index < table.headers.len() {
                    Ok(*index)
                } else {
                    Err(Error::table(format!(
                        "column index {} out of range (table has {} columns)",
                        index,
                        table.headers.len()
                    )))
                }
            },
            ColumnSelector::Name(name) => table.column_index(name).ok_or_else(|| {
                Error::table(format!("no column named '{}'", name))
            }),
        }
    }
}

/// Inclusive row slice in spreadsheet coordinates: row 1 is the header,
/// data starts on row 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub first: usize,
    pub last: usize,
}

impl RowRange {
    pub fn new(first: usize, last: usize) -> Result<Self> {
        if first < 2 {
            return Err(Error::table(format!(
                "row range starts at {} but row 1 is the header",
                first
            )));
        }
        if first > last {
            return Err(Error::table(format!(
                "row range {}..{} is inverted",
                first, last
            )));
        }
        Ok(Self { first, last })
    }

    /// 0-based index range into a table's data rows, clamped to the row
    /// count. A range past the end of the table is empty, not an error.
    pub fn clamp_to(&self, row_count: usize) -> std::ops::Range<usize> {
        let start = (self.first - 2).min(row_count);
        let end = (self.last - 1).min(row_count);
        start..end.max(start)
    }
}

/// In-memory tabular data: one header row plus data rows of cells. Rows
/// may be ragged on read; writes pad every row to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ColumnTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        debug!("Reading table from {:?}", path_ref);
        let file = std::fs::File::open(path_ref)?;
        let table = Self::from_reader(file)?;
        info!(
            "Read table from {:?}: {} columns, {} data rows",
            path_ref,
            table.headers.len(),
            table.rows.len()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = csv_reader.records();
        let headers = match records.next() {
            Some(record) => record?.iter().map(|cell| cell.to_string()).collect(),
            None => return Err(Error::table("table has no header row")),
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell at a 0-based data-row index. Absent cells of a ragged row
    /// read as `None`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// Set a cell, padding the row with empty cells as needed. Rows past
    /// the current end are created.
    pub fn set_cell(&mut self, row: usize, column: usize, value: String) {
        while self.rows.len() <= row {
            self.rows.push(Vec::new());
        }
        let cells = &mut self.rows[row];
        while cells.len() <= column {
            cells.push(String::new());
        }
        cells[column] = value;
    }

    /// Index of the named column, appending a new header if it does not
    /// exist yet.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        match self.column_index(name) {
            Some(index) => index,
            None => {
                self.headers.push(name.to_string());
                self.headers.len() - 1
            },
        }
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().from_writer(writer);

        csv_writer.write_record(&self.headers)?;
        let width = self.headers.len();
        for cells in &self.rows {
            let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
            padded.resize(width, "");
            csv_writer.write_record(&padded)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the whole table to a file. The output is built in memory
    /// first, so a failed write never leaves a partial table behind.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        std::fs::write(path.as_ref(), buffer)?;
        info!(
            "Wrote table to {:?}: {} columns, {} data rows",
            path.as_ref(),
            self.headers.len(),
            self.rows.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ColumnTable {
        ColumnTable::from_reader(
            "name,amount,note\nalpha,10,first\nbeta,20,second\ngamma,30,third\n".as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn reads_headers_and_rows() {
        let table = sample();
        assert_eq!(table.headers(), &["name", "amount", "note"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.cell(1, 0), Some("beta"));
        assert_eq!(table.cell(3, 0), None);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(ColumnTable::from_reader("".as_bytes()).is_err());
    }

    #[test]
    fn ensure_column_appends_once() {
        let mut table = sample();
        let index = table.ensure_column("fixed");
        assert_eq!(index, 3);
        assert_eq!(table.ensure_column("fixed"), 3);
        assert_eq!(table.ensure_column("amount"), 1);
    }

    #[test]
    fn set_cell_pads_ragged_rows() {
        let mut table = sample();
        let column = table.ensure_column("fixed");
        table.set_cell(0, column, "value".to_string());
        assert_eq!(table.cell(0, column), Some("value"));
        assert_eq!(table.cell(1, column), None);
    }

    #[test]
    fn round_trip_preserves_cells() {
        let mut table = sample();
        let column = table.ensure_column("fixed");
        table.set_cell(2, column, "x".to_string());

        let mut buffer = Vec::new();
        table.write_to(&mut buffer).unwrap();
        let reread = ColumnTable::from_reader(buffer.as_slice()).unwrap();

        assert_eq!(reread.headers(), table.headers());
        assert_eq!(reread.cell(2, column), Some("x"));
        // Padding makes the short rows explicit
        assert_eq!(reread.cell(0, column), Some(""));
    }

    #[test]
    fn write_to_path_produces_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        sample().write_to_path(&path).unwrap();
        let reread = ColumnTable::from_path(&path).unwrap();
        assert_eq!(reread.row_count(), 3);
    }

    #[test]
    fn row_range_maps_to_data_rows() {
        let range = RowRange::new(2, 400).unwrap();
        assert_eq!(range.clamp_to(3), 0..3);
        assert_eq!(range.clamp_to(500), 0..399);

        let narrow = RowRange::new(3, 4).unwrap();
        assert_eq!(narrow.clamp_to(10), 1..3);
    }

    #[test]
    fn row_range_past_the_table_is_empty() {
        let range = RowRange::new(100, 200).unwrap();
        assert_eq!(range.clamp_to(3), 3..3);
    }

    #[test]
    fn invalid_row_ranges_are_rejected() {
        assert!(RowRange::new(1, 10).is_err());
        assert!(RowRange::new(10, 2).is_err());
    }

    #[test]
    fn selector_resolution() {
        let table = sample();
        assert_eq!(ColumnSelector::Index(1).resolve(&table).unwrap(), 1);
        assert_eq!(
            ColumnSelector::Name("note".to_string()).resolve(&table).unwrap(),
            2
        );
        assert!(ColumnSelector::Index(9).resolve(&table).is_err());
        assert!(ColumnSelector::Name("missing".to_string()).resolve(&table).is_err());
    }
}
