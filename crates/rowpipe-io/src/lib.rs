#![forbid(unsafe_code)]
//! rowpipe-io: the table-load boundary and result writers.
//!
//! Readers turn a delimited text file into a `RowSet` (one row per record,
//! one cell per field). Writers serialize a result `RowSet` for the CLI.

pub mod buf;
pub mod error;
pub mod readers;
pub mod writers;

pub use error::{IoError, Result};
pub use readers::csv::CsvReader;
pub use writers::csv::CsvWriter;
pub use writers::jsonl::JsonlWriter;
