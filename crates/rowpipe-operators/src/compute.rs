//! Row compute: append one computed cell to each row.

use rowpipe_core::types::{Cell, Row};

use crate::traits::{OpError, RowOperator};

type ComputeFn = dyn Fn(&Row) -> Result<Cell, OpError> + Send + Sync;

pub struct RowCompute {
    label: String,
    compute: Box<ComputeFn>,
}

impl RowCompute {
    /// `compute` must be pure: it sees the row as it arrives at this step.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(&Row) -> Result<Cell, OpError> + Send + Sync + 'static,
    {
        Self {
            label: "compute".to_string(),
            compute: Box::new(compute),
        }
    }

    /// Attach a label shown by `explain`.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl RowOperator for RowCompute {
    fn name(&self) -> &'static str {
        "compute"
    }

    fn describe(&self) -> String {
        format!("Compute({})", self.label)
    }

    fn process(&self, row: Row) -> Result<Row, OpError> {
        let cell = (self.compute)(&row)?;
        Ok(row.with_cell(cell))
    }
}

impl std::fmt::Debug for RowCompute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowCompute").field("label", &self.label).finish()
    }
}
