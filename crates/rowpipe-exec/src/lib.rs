#![forbid(unsafe_code)]
//! rowpipe-exec: the engine facade and the execution driver.
//!
//! The engine loads a table through `rowpipe-io` and runs an operator tree
//! over it in one synchronous call.

pub mod metrics;
pub mod runtime;

pub use metrics::RunReport;
pub use runtime::{Engine, ExecError};
