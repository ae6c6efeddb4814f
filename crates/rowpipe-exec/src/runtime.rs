//! Runtime: load a table and drive an operator tree over it.
//!
//! Behavior:
//! - `read_table_from_file` is the only ingestion entry point.
//! - `execute` calls the root's `execute`; the tree pulls its children
//!   post-order and every failure propagates unchanged.
//! - No partial results: an error anywhere in the tree fails the query.

use std::path::Path;
use std::time::Instant;

use thiserror::Error;

use rowpipe_core::config::EngineConfig;
use rowpipe_core::types::RowSet;
use rowpipe_io::{CsvReader, IoError};
use rowpipe_operators::{OpError, OperatorNode};
use rowpipe_planner::{ParsedPipeline, PipelineConfig, PlanError};

use crate::metrics::RunReport;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("load failed: {0}")]
    Load(#[from] IoError),
    #[error("operator exec: {0}")]
    Operator(#[from] OpError),
    #[error("invalid pipeline: {0}")]
    Plan(#[from] PlanError),
    #[error("invalid plan: {0}")]
    Invalid(String),
}

/// Engine owns the loader configuration.
#[derive(Debug, Clone)]
pub struct Engine {
    cfg: EngineConfig,
    reader: CsvReader,
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        let reader = CsvReader::new(cfg.clone());
        Self { cfg, reader }
    }

    pub fn from_env() -> Self {
        Self::new(EngineConfig::from_env())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Load a delimited text file into a row set.
    pub fn read_table_from_file<P: AsRef<Path>>(&self, path: P) -> Result<RowSet, ExecError> {
        Ok(self.reader.read_path(path)?)
    }

    /// Run `root` over `base` and return the root's output.
    pub fn execute(&self, root: &OperatorNode, base: Option<RowSet>) -> Result<RowSet, ExecError> {
        Ok(self.execute_with_report(root, base)?.0)
    }

    pub fn execute_with_report(
        &self,
        root: &OperatorNode,
        base: Option<RowSet>,
    ) -> Result<(RowSet, RunReport), ExecError> {
        let rows_in = base.as_ref().map_or(0, RowSet::len);
        let span = tracing::debug_span!("query", root = root.operator().name(), rows_in);
        let _enter = span.enter();

        let started = Instant::now();
        let rows = root.execute(base)?;
        let report = RunReport {
            rows_in,
            rows_out: rows.len(),
            operators: root.depth(),
            elapsed_us: started.elapsed().as_micros() as u64,
        };
        report.emit();
        Ok((rows, report))
    }

    /// Loader config for `pipeline`: this engine's config, then the file's
    /// `config` block, then `overrides` (e.g. command-line flags).
    pub fn pipeline_config(
        &self,
        pipeline: &ParsedPipeline,
        overrides: &PipelineConfig,
    ) -> Result<EngineConfig, ExecError> {
        let mut cfg = self.cfg.clone();
        pipeline.config.apply(&mut cfg)?;
        overrides.apply(&mut cfg)?;
        Ok(cfg)
    }

    /// Load the pipeline's source (or `source_override`) and run its tree.
    pub fn run_pipeline(
        &self,
        pipeline: &ParsedPipeline,
        source_override: Option<&Path>,
        overrides: &PipelineConfig,
    ) -> Result<(RowSet, RunReport), ExecError> {
        let source = match (source_override, pipeline.source.as_deref()) {
            (Some(p), _) => p.to_path_buf(),
            (None, Some(s)) => Path::new(s).to_path_buf(),
            (None, None) => {
                return Err(ExecError::Invalid(
                    "pipeline has no source and none was given".into(),
                ))
            }
        };

        let cfg = self.pipeline_config(pipeline, overrides)?;
        let base = CsvReader::new(cfg).read_path(&source)?;
        self.execute_with_report(&pipeline.tree, Some(base))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowpipe_operators::{Filter, Limit, Sort};
    use std::io::Write;

    fn csv_file(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_and_runs_tree() {
        let f = csv_file("3,c\n1,a\n2,b\n");
        let engine = Engine::new(EngineConfig {
            infer_types: true,
            ..EngineConfig::default()
        });
        let base = engine.read_table_from_file(f.path()).unwrap();
        let tree = OperatorNode::leaf(Sort::new(0)).then(Limit::new(2));
        let (out, report) = engine.execute_with_report(&tree, Some(base)).unwrap();

        let firsts: Vec<&str> = out.iter().map(|r| r.cell(1).unwrap().val()).collect();
        assert_eq!(firsts, vec!["a", "b"]);
        assert_eq!(report.rows_in, 3);
        assert_eq!(report.rows_out, 2);
        assert_eq!(report.operators, 2);
    }

    #[test]
    fn operator_failure_surfaces_unchanged() {
        let engine = Engine::default();
        let base = RowSet::new(vec![rowpipe_core::types::Row::new(vec![])]);
        let tree = OperatorNode::leaf(Filter::new(0)).then(Limit::new(1));
        let err = engine.execute(&tree, Some(base)).unwrap_err();
        assert!(matches!(
            err,
            ExecError::Operator(OpError::Core(rowpipe_core::Error::ColumnOutOfRange {
                index: 0,
                width: 0
            }))
        ));
    }

    #[test]
    fn pipeline_without_source_is_invalid() {
        let parsed = rowpipe_planner::parse_yaml_pipeline("steps:\n  - op: limit\n    limit: 1\n")
            .unwrap();
        let err = Engine::default()
            .run_pipeline(&parsed, None, &PipelineConfig::default())
            .unwrap_err();
        assert!(matches!(err, ExecError::Invalid(_)));
    }

    #[test]
    fn pipeline_config_applies_to_load() {
        let f = csv_file("n;flag\n5;1\n0;1\n");
        let parsed = rowpipe_planner::parse_yaml_pipeline(
            r#"
config: { delimiter: ";", has_headers: true, infer_types: true }
steps:
  - op: filter
    column: 0
"#,
        )
        .unwrap();
        let (out, _) = Engine::default()
            .run_pipeline(&parsed, Some(f.path()), &PipelineConfig::default())
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows()[0].cell(0).unwrap().val(), "5");
    }

    #[test]
    fn overrides_win_over_file_and_engine_config() {
        let f = csv_file("b|2\na|1\n");
        let parsed = rowpipe_planner::parse_yaml_pipeline(
            r#"
config: { delimiter: ";" }
steps:
  - op: sort
    column: 0
"#,
        )
        .unwrap();
        let engine = Engine::new(EngineConfig {
            delimiter: b'\t',
            ..EngineConfig::default()
        });
        let overrides = PipelineConfig {
            delimiter: Some("|".into()),
            ..Default::default()
        };

        let cfg = engine.pipeline_config(&parsed, &overrides).unwrap();
        assert_eq!(cfg.delimiter, b'|');
        let file_only = engine
            .pipeline_config(&parsed, &PipelineConfig::default())
            .unwrap();
        assert_eq!(file_only.delimiter, b';');

        let (out, report) = engine
            .run_pipeline(&parsed, Some(f.path()), &overrides)
            .unwrap();
        assert_eq!(report.rows_in, 2);
        assert_eq!(out.rows()[0].cells().len(), 2);
        assert_eq!(out.rows()[0].cell(0).unwrap().val(), "a");
    }

    #[test]
    fn report_serializes() {
        let report = RunReport {
            rows_in: 1,
            rows_out: 1,
            operators: 1,
            elapsed_us: 0,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"rows_out\":1"));
    }
}
