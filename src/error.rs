//! Unified pipeline error.

use thiserror::Error;

use crate::config::ConfigError;
use crate::data::DatasetError;
use crate::model::ModelError;

/// Any failure in a pipeline run.
///
/// There is no retry or recovery anywhere in the pipeline: every stage
/// propagates its first error and the binary exits non-zero.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
