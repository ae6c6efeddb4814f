#![forbid(unsafe_code)]
//! rowpipe-operators: pull-based operators (limit/project/filter/sort) and the
//! row-level steps (compute/select) projections are built from.
//!
//! Design intent:
//! - Pure and synchronous; every operator call runs to completion.
//! - Each set operator materializes its full output before returning.
//! - The tree walk lives in `OperatorNode`; operators only define `transform`.

pub mod traits;

pub mod compute;
pub mod filter;
pub mod limit;
pub mod project;
pub mod selection;
pub mod sort;

pub use compute::RowCompute;
pub use filter::Filter;
pub use limit::Limit;
pub use project::{Projection, ProjectionBuilder};
pub use selection::Selection;
pub use sort::Sort;
pub use traits::{OpError, OperatorNode, RowOperator, UnaryOperator};
