//! NDJSON writer: one JSON array per row, values typed by their cell tag.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use rowpipe_core::types::{Cell, CellType, RowSet};

pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
}

impl JsonlWriter<File> {
    pub fn to_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::create(path)?;
        Ok(Self::to_writer(f))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    pub fn write_rows(&mut self, rows: &RowSet) -> Result<()> {
        for row in rows {
            let values: Vec<serde_json::Value> = row.cells().iter().map(cell_to_json).collect();
            let line = serde_json::to_string(&values)?;
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::IoError::Io(e.into_error()))
    }
}

/// Typed cells become JSON numbers/booleans when their text parses; anything
/// else is emitted as a string.
fn cell_to_json(c: &Cell) -> serde_json::Value {
    use serde_json::Value;
    let v = c.val();
    match c.cell_type() {
        CellType::Int => v
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(v.to_string())),
        CellType::Float => v
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(v.to_string())),
        CellType::Bool => match c.is_truthy() {
            Ok(b) => Value::Bool(b),
            Err(_) => Value::String(v.to_string()),
        },
        CellType::None | CellType::String => Value::String(v.to_string()),
    }
}
