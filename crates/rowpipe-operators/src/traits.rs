//! Operator traits + the shared tree executor.
//!
//! Set-level operators implement [`UnaryOperator::transform`]; row-level steps
//! implement [`RowOperator::process`]. The recursive pull through the tree is
//! implemented once, in [`OperatorNode::execute`].

use rowpipe_core::types::{Row, RowSet};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OpError {
    /// Shape/type failures raised by the data model.
    #[error(transparent)]
    Core(#[from] rowpipe_core::Error),

    /// A leaf operator was executed without a base row set.
    #[error("operator '{0}' has no child and no input row set")]
    MissingInput(&'static str),

    #[error("execution error: {0}")]
    Exec(String),
}

/// Set-level operator: one `transform` per concrete kind.
///
/// Invariants:
/// - `transform` owns its input and returns a freshly built row set.
/// - `transform` must be deterministic given the same input.
pub trait UnaryOperator: Send + Sync {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// One-line description including parameters, used by `explain`.
    fn describe(&self) -> String {
        self.name().to_string()
    }

    fn transform(&self, input: RowSet) -> Result<RowSet, OpError>;
}

/// Row-level step applied once per row by a projection.
pub trait RowOperator: Send + Sync {
    fn name(&self) -> &'static str;

    fn describe(&self) -> String {
        self.name().to_string()
    }

    fn process(&self, row: Row) -> Result<Row, OpError>;
}

/// A node in the operator tree. Exclusively owns its optional child.
pub struct OperatorNode {
    op: Box<dyn UnaryOperator>,
    child: Option<Box<OperatorNode>>,
}

impl OperatorNode {
    /// A leaf: transforms the externally supplied base row set.
    pub fn leaf(op: impl UnaryOperator + 'static) -> Self {
        Self {
            op: Box::new(op),
            child: None,
        }
    }

    /// A parent over an already constructed child.
    pub fn with_child(op: impl UnaryOperator + 'static, child: OperatorNode) -> Self {
        Self {
            op: Box::new(op),
            child: Some(Box::new(child)),
        }
    }

    pub fn from_boxed(op: Box<dyn UnaryOperator>, child: Option<OperatorNode>) -> Self {
        Self {
            op,
            child: child.map(Box::new),
        }
    }

    /// Wrap `self` as the child of a new parent node.
    pub fn then(self, op: impl UnaryOperator + 'static) -> Self {
        OperatorNode::with_child(op, self)
    }

    pub fn operator(&self) -> &dyn UnaryOperator {
        self.op.as_ref()
    }

    pub fn child(&self) -> Option<&OperatorNode> {
        self.child.as_deref()
    }

    /// Number of nodes from this one down to the leaf.
    pub fn depth(&self) -> usize {
        1 + self.child.as_ref().map_or(0, |c| c.depth())
    }

    /// Pull the child's full result, then apply this node's transform.
    ///
    /// `base` is handed down the chain and consumed only by the leaf.
    pub fn execute(&self, base: Option<RowSet>) -> Result<RowSet, OpError> {
        let input = match &self.child {
            Some(child) => child.execute(base)?,
            None => base.ok_or(OpError::MissingInput(self.op.name()))?,
        };
        let rows_in = input.len();
        let output = self.op.transform(input)?;
        tracing::debug!(
            op = self.op.name(),
            rows_in,
            rows_out = output.len(),
            "operator executed"
        );
        Ok(output)
    }

    /// Render the tree root-first, one operator per line.
    pub fn explain(&self) -> String {
        let mut out = String::new();
        let mut node = Some(self);
        let mut depth = 0;
        while let Some(n) = node {
            if depth > 0 {
                out.push('\n');
            }
            out.push_str(&"  ".repeat(depth));
            out.push_str(&n.op.describe());
            node = n.child();
            depth += 1;
        }
        out
    }
}

impl std::fmt::Debug for OperatorNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorNode")
            .field("op", &self.op.describe())
            .field("child", &self.child)
            .finish()
    }
}
