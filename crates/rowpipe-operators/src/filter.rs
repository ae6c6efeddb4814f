//! Filter operator: keep rows whose cell at `column` is truthy.
//!
//! Truthiness follows the cell's type tag (see `Cell::is_truthy`): non-empty
//! text, non-zero numbers, boolean `true`.

use rowpipe_core::types::RowSet;

use crate::traits::{OpError, UnaryOperator};

#[derive(Debug, Clone, Copy)]
pub struct Filter {
    pub column: usize,
}

impl Filter {
    pub fn new(column: usize) -> Self {
        Self { column }
    }
}

impl UnaryOperator for Filter {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn describe(&self) -> String {
        format!("Filter(column={})", self.column)
    }

    fn transform(&self, input: RowSet) -> Result<RowSet, OpError> {
        let mut kept = Vec::with_capacity(input.len());
        for row in input {
            if row.cell(self.column)?.is_truthy()? {
                kept.push(row);
            }
        }
        Ok(RowSet::new(kept))
    }
}
