use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid pipeline: {0}")]
    Invalid(String),

    #[error(transparent)]
    Core(#[from] rowpipe_core::Error),
}
