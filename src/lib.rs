//! sijill is a library for making sense of Arabic transaction-log text
//! extracted from spreadsheet columns. It classifies line shapes
//! (timestamped entries, headers, mixed content), extracts coded fields
//! from entry remainders, repairs run-together Arabic text, and drives a
//! batch fix-and-translate flow over tabular data with pluggable
//! translation services.

// Module declarations
pub mod error;
pub mod types;
pub mod classifier;
pub mod report;
pub mod fixer;
pub mod translate;
pub mod table;
pub mod batch;
pub mod config;

// Re-exports
pub use error::{Error, Result};
pub use types::{LineCategory, LineRecord};
pub use classifier::classify;
pub use report::{aggregate, AggregateReport};
pub use fixer::{is_arabic, ArabicFixer, FixOutcome};
pub use translate::{ChainTranslator, DictionaryTranslator, Translator};
pub use table::{ColumnSelector, ColumnTable, RowRange};
pub use batch::{BatchOptions, BatchProcessor, BatchReport};

// Re-export the config from config module
pub use config::SijillConfig;
