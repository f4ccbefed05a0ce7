// src/config/subsystems/processor.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;
use crate::table::{ColumnSelector, RowRange};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    // Spreadsheet row range, 1-based, header on row 1
    pub first_row: usize,
    pub last_row: usize,

    // Column holding the text to process: a 0-based index or a header name
    pub source_column: String,

    // Output column names
    pub fixed_column: String,
    pub translated_column: String,

    // Reporting settings
    pub write_report: bool,
    pub sample_limit: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            // Observed usage: header on row 1, data on rows 2-400 of column M
            first_row: 2,
            last_row: 400,
            source_column: "12".to_string(),
            fixed_column: "AC".to_string(),
            translated_column: "AD".to_string(),
            write_report: true,
            sample_limit: 5,
        }
    }
}

impl FromIni for ProcessorConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "processor" {
            return None;
        }

        match key {
            "first_row" => {
                match value.parse() {
                    Ok(row) if row >= 2 => {
                        self.first_row = row;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid first_row (must be >= 2, row 1 is the header): {}", value)
                    ))),
                }
            },
            "last_row" => {
                match value.parse() {
                    Ok(row) if row >= 2 => {
                        self.last_row = row;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid last_row (must be >= 2): {}", value)
                    ))),
                }
            },
            "source_column" => {
                let column = value.trim_matches('"').to_string();
                if column.is_empty() {
                    Some(Err(Error::Config("source_column must not be empty".to_string())))
                } else {
                    self.source_column = column;
                    Some(Ok(()))
                }
            },
            "fixed_column" => {
                let column = value.trim_matches('"').to_string();
                if column.is_empty() {
                    Some(Err(Error::Config("fixed_column must not be empty".to_string())))
                } else {
                    self.fixed_column = column;
                    Some(Ok(()))
                }
            },
            "translated_column" => {
                let column = value.trim_matches('"').to_string();
                if column.is_empty() {
                    Some(Err(Error::Config("translated_column must not be empty".to_string())))
                } else {
                    self.translated_column = column;
                    Some(Ok(()))
                }
            },
            "write_report" => {
                match value.parse() {
                    Ok(flag) => {
                        self.write_report = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid write_report value (must be true/false): {}", value)
                    ))),
                }
            },
            "sample_limit" => {
                match value.parse() {
                    Ok(limit) => {
                        self.sample_limit = limit;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid sample_limit (must be a number): {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl ProcessorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.first_row < 2 {
            return Err(Error::Config(
                "first_row must be >= 2 (row 1 is the header)".to_string()
            ));
        }

        if self.first_row > self.last_row {
            return Err(Error::Config(format!(
                "first_row {} is past last_row {}",
                self.first_row, self.last_row
            )));
        }

        if self.fixed_column == self.translated_column {
            return Err(Error::Config(format!(
                "fixed_column and translated_column must differ (both are '{}')",
                self.fixed_column
            )));
        }

        Ok(())
    }

    /// The configured row slice in spreadsheet coordinates.
    pub fn row_range(&self) -> Result<RowRange> {
        RowRange::new(self.first_row, self.last_row)
    }

    /// The source column as a table selector: numeric values select by
    /// 0-based index, anything else by header name.
    pub fn source_selector(&self) -> ColumnSelector {
        match self.source_column.parse::<usize>() {
            Ok(index) => ColumnSelector::Index(index),
            Err(_) => ColumnSelector::Name(self.source_column.clone()),
        }
    }
}
