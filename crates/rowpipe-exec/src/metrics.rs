//! Per-run summary emitted through `tracing`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Rows in the base row set handed to the leaf.
    pub rows_in: usize,
    /// Rows returned by the root operator.
    pub rows_out: usize,
    /// Operators in the executed tree.
    pub operators: usize,
    /// Wall time of the tree execution (excludes loading).
    pub elapsed_us: u64,
}

impl RunReport {
    pub fn emit(&self) {
        tracing::info!(
            rows_in = self.rows_in,
            rows_out = self.rows_out,
            operators = self.operators,
            elapsed_us = self.elapsed_us,
            "query finished"
        );
    }
}
