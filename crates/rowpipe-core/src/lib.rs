#![forbid(unsafe_code)]
//! rowpipe-core: the tabular data model, configuration and error taxonomy.
//!
//! No IO and no operators live here; everything in this crate is plain data
//! that the operator and IO crates build on.

pub mod config;
pub mod error;
pub mod prelude;
pub mod types;

pub use error::{Error, Result};
pub use types::{Cell, CellType, Row, RowSet, SortKey};
