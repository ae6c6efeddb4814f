//! Minimal YAML → operator tree parser for *linear* pipelines.
//!
//! Example:
//! ```yaml
//! source: "data/people.csv"
//! config: { infer_types: true }
//! steps:
//!   - op: sort
//!     column: 0
//!   - op: filter
//!     column: 2
//!   - op: project
//!     steps:
//!       - compute: { kind: concat, columns: [1, 0], separator: "-" }
//!       - select: { columns: [3, 1] }
//!   - op: limit
//!     limit: 10
//! ```
//!
//! Steps are listed leaf-first: the first step consumes the loaded table and
//! the last one is the root of the tree.

use serde::{Deserialize, Serialize};

use rowpipe_core::config::{parse_delimiter, EngineConfig};
use rowpipe_core::types::CellType;
use rowpipe_operators::{Filter, Limit, OperatorNode, Projection, Sort, UnaryOperator};

use crate::builtins;
use crate::error::PlanError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    /// Path of the delimited text table feeding the leaf operator.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub config: Option<PipelineConfig>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "op")]
pub enum Step {
    #[serde(rename = "limit")]
    Limit { limit: usize },

    #[serde(rename = "filter")]
    Filter { column: usize },

    #[serde(rename = "sort")]
    Sort { column: usize },

    #[serde(rename = "project")]
    Project { steps: Vec<ProjectStep> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStep {
    Select { columns: Vec<usize> },
    Compute(ComputeDef),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ComputeDef {
    Constant {
        value: String,
        #[serde(rename = "type", default)]
        cell_type: Option<String>,
    },
    Concat {
        columns: Vec<usize>,
        #[serde(default)]
        separator: String,
    },
    Sum {
        columns: Vec<usize>,
    },
}

/// Loader overrides carried by a pipeline file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub delimiter: Option<String>,
    pub has_headers: Option<bool>,
    pub trim: Option<bool>,
    pub infer_types: Option<bool>,
    pub read_buffer_bytes: Option<usize>,
}

impl PipelineConfig {
    /// Overlay the values present in the file onto `cfg`.
    pub fn apply(&self, cfg: &mut EngineConfig) -> Result<(), PlanError> {
        if let Some(d) = &self.delimiter {
            cfg.delimiter = parse_delimiter(d)?;
        }
        if let Some(v) = self.has_headers {
            cfg.has_headers = v;
        }
        if let Some(v) = self.trim {
            cfg.trim = v;
        }
        if let Some(v) = self.infer_types {
            cfg.infer_types = v;
        }
        if let Some(v) = self.read_buffer_bytes {
            cfg.read_buffer_bytes = v;
        }
        cfg.validate()?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct ParsedPipeline {
    pub source: Option<String>,
    pub config: PipelineConfig,
    pub tree: OperatorNode,
}

pub fn parse_yaml_pipeline(yaml_src: &str) -> Result<ParsedPipeline, PlanError> {
    let doc: Pipeline = serde_yaml::from_str(yaml_src)?;
    let tree = build_tree(doc.steps)?;
    Ok(ParsedPipeline {
        source: doc.source,
        config: doc.config.unwrap_or_default(),
        tree,
    })
}

/// Chain `steps` into a tree, first step at the leaf.
pub fn build_tree(steps: Vec<Step>) -> Result<OperatorNode, PlanError> {
    let mut cur: Option<OperatorNode> = None;
    for step in steps {
        let op = build_operator(step)?;
        cur = Some(OperatorNode::from_boxed(op, cur));
    }
    cur.ok_or_else(|| PlanError::Invalid("pipeline has no steps".into()))
}

fn build_operator(step: Step) -> Result<Box<dyn UnaryOperator>, PlanError> {
    Ok(match step {
        Step::Limit { limit } => Box::new(Limit::new(limit)),
        Step::Filter { column } => Box::new(Filter::new(column)),
        Step::Sort { column } => Box::new(Sort::new(column)),
        Step::Project { steps } => {
            if steps.is_empty() {
                return Err(PlanError::Invalid("project needs at least one step".into()));
            }
            let mut builder = Projection::builder();
            for s in steps {
                builder = match s {
                    ProjectStep::Select { columns } => builder.select(columns),
                    ProjectStep::Compute(def) => builder.step(build_compute(def)?),
                };
            }
            Box::new(builder.build())
        }
    })
}

fn build_compute(def: ComputeDef) -> Result<rowpipe_operators::RowCompute, PlanError> {
    match def {
        ComputeDef::Constant { value, cell_type } => {
            let ty = match cell_type {
                None => CellType::String,
                Some(name) => CellType::parse(&name)
                    .ok_or_else(|| PlanError::Invalid(format!("unknown cell type '{}'", name)))?,
            };
            builtins::constant(&value, ty)
        }
        ComputeDef::Concat { columns, separator } => Ok(builtins::concat(columns, separator)),
        ComputeDef::Sum { columns } => {
            if columns.is_empty() {
                return Err(PlanError::Invalid("sum needs at least one column".into()));
            }
            Ok(builtins::sum(columns))
        }
    }
}
