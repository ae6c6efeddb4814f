//! Selection: pick (and reorder) cells by position.

use rowpipe_core::types::Row;

use crate::traits::{OpError, RowOperator};

#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub indices: Vec<usize>,
}

impl Selection {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }
}

impl RowOperator for Selection {
    fn name(&self) -> &'static str {
        "select"
    }

    fn describe(&self) -> String {
        format!("Select({:?})", self.indices)
    }

    fn process(&self, row: Row) -> Result<Row, OpError> {
        let cells = self
            .indices
            .iter()
            .map(|&i| row.cell(i).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Row::new(cells))
    }
}
