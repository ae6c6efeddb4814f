//! Delimited text → `RowSet`.
//!
//! Each record becomes one `Row`; each field one `Cell` tagged `None` with a
//! zero size hint and the raw field text as its value. With `infer_types` the
//! cells are tagged via `Cell::infer` instead. Ragged records are accepted
//! as-is; shape problems surface when an operator touches the missing column.
//!
//! Blank lines are not records: the `csv` parser skips them, so they never
//! become zero-cell rows. A line holding only a delimiter (`,`) is a record
//! of empty fields and is kept.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use rowpipe_core::config::EngineConfig;
use rowpipe_core::types::{Cell, Row, RowSet};

use crate::buf::counting_from_path;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct CsvReader {
    cfg: EngineConfig,
}

impl CsvReader {
    pub fn new(cfg: EngineConfig) -> Self {
        Self { cfg }
    }

    /// Load the whole file at `path`.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<RowSet> {
        let path = path.as_ref();
        let mut reader = counting_from_path(path, self.cfg.read_buffer_bytes)?;
        let rows = self.read_from(&mut reader)?;
        tracing::debug!(
            path = %path.display(),
            rows = rows.len(),
            bytes = reader.bytes_read(),
            "table loaded"
        );
        Ok(rows)
    }

    /// Load every record from an arbitrary reader.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<RowSet> {
        self.cfg.validate()?;
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.cfg.delimiter)
            .has_headers(self.cfg.has_headers)
            .flexible(true)
            .trim(if self.cfg.trim { Trim::All } else { Trim::None })
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let cells = record
                .iter()
                .map(|field| {
                    if self.cfg.infer_types {
                        Cell::infer(field)
                    } else {
                        Cell::untyped(field)
                    }
                })
                .collect();
            rows.push(Row::new(cells));
        }
        Ok(RowSet::new(rows))
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
