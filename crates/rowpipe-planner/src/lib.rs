#![forbid(unsafe_code)]
//! rowpipe-planner: linear pipeline descriptions → operator trees.
//!
//! Steps are turned into `OperatorNode`s exactly in the order they are
//! written (first step is the leaf). No reordering or rewriting happens here.

pub mod builtins;
pub mod dsl;
pub mod error;

pub use dsl::yaml::{parse_yaml_pipeline, ParsedPipeline, Pipeline, PipelineConfig, Step};
pub use error::PlanError;
