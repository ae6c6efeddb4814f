//! Delimited text writer for result row sets.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use rowpipe_core::types::RowSet;

use crate::error::Result;

pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvWriter<File> {
    pub fn to_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f, delimiter))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn to_writer(writer: W, delimiter: u8) -> Self {
        Self {
            writer: WriterBuilder::new()
                .delimiter(delimiter)
                .flexible(true)
                .from_writer(writer),
        }
    }

    /// Write every row as one record of raw cell values.
    pub fn write_rows(&mut self, rows: &RowSet) -> Result<()> {
        for row in rows {
            self.writer.write_record(row.cells().iter().map(|c| c.val()))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| {
            let err = e.error();
            crate::IoError::Io(std::io::Error::new(err.kind(), err.to_string()))
        })
    }
}
