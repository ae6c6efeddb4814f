#![forbid(unsafe_code)]
//! rowpipe: a minimal single-table query engine.
//!
//! A query is a tree of unary operators (limit, project, filter, sort) that
//! pulls a table loaded from delimited text through each operator in turn.
//!
//! ```no_run
//! use rowpipe::exec::Engine;
//! use rowpipe::operators::{Filter, Limit, OperatorNode, Sort};
//!
//! let engine = Engine::from_env();
//! let table = engine.read_table_from_file("people.csv")?;
//! let query = OperatorNode::leaf(Sort::new(0))
//!     .then(Filter::new(2))
//!     .then(Limit::new(10));
//! let rows = engine.execute(&query, Some(table))?;
//! # Ok::<(), rowpipe::exec::ExecError>(())
//! ```

pub use rowpipe_core as core;
pub use rowpipe_exec as exec;
pub use rowpipe_io as io;
pub use rowpipe_operators as operators;
pub use rowpipe_planner as planner;

pub use rowpipe_core::{Cell, CellType, Row, RowSet};
pub use rowpipe_exec::{Engine, ExecError};
