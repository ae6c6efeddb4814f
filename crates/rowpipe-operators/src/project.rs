//! Projection: thread every row through an ordered list of row-level steps.
//!
//! Step order is significant; `[compute, select]` and `[select, compute]` see
//! different rows.

use rowpipe_core::types::{Cell, Row, RowSet};

use crate::compute::RowCompute;
use crate::selection::Selection;
use crate::traits::{OpError, RowOperator, UnaryOperator};

#[derive(Default)]
pub struct Projection {
    steps: Vec<Box<dyn RowOperator>>,
}

impl Projection {
    pub fn new(steps: Vec<Box<dyn RowOperator>>) -> Self {
        Self { steps }
    }

    pub fn builder() -> ProjectionBuilder {
        ProjectionBuilder::default()
    }

    pub fn steps(&self) -> &[Box<dyn RowOperator>] {
        &self.steps
    }

    fn process_row(&self, row: Row) -> Result<Row, OpError> {
        self.steps.iter().try_fold(row, |row, step| step.process(row))
    }
}

impl UnaryOperator for Projection {
    fn name(&self) -> &'static str {
        "project"
    }

    fn describe(&self) -> String {
        let steps: Vec<String> = self.steps.iter().map(|s| s.describe()).collect();
        format!("Project[{}]", steps.join(" -> "))
    }

    fn transform(&self, input: RowSet) -> Result<RowSet, OpError> {
        input
            .into_iter()
            .map(|row| self.process_row(row))
            .collect::<Result<Vec<_>, _>>()
            .map(RowSet::new)
    }
}

/// Assembles the step list before the projection node is built.
#[derive(Default)]
pub struct ProjectionBuilder {
    steps: Vec<Box<dyn RowOperator>>,
}

impl ProjectionBuilder {
    pub fn step(mut self, step: impl RowOperator + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn boxed_step(mut self, step: Box<dyn RowOperator>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn compute<F>(self, compute: F) -> Self
    where
        F: Fn(&Row) -> Result<Cell, OpError> + Send + Sync + 'static,
    {
        self.step(RowCompute::new(compute))
    }

    pub fn select(self, indices: Vec<usize>) -> Self {
        self.step(Selection::new(indices))
    }

    pub fn build(self) -> Projection {
        Projection::new(self.steps)
    }
}
