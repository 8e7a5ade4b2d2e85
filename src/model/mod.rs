//! Classifier model and artifact persistence.
//!
//! [`LogisticModel`] is a deterministic full-batch logistic regression:
//! zero-initialized, fixed epoch count, no RNG, so repeated training runs on
//! identical data produce identical models. The fitted state serializes to a
//! versioned bincode artifact (see [`artifact`]).

pub mod artifact;
mod logistic;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use logistic::{LogisticModel, MODEL_NAME};

/// Errors from training, prediction, and artifact handling.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model has not been fitted yet.
    #[error("model has not been fitted")]
    NotFitted,

    /// Training was attempted on an empty feature matrix.
    #[error("cannot train on an empty dataset")]
    EmptyTrainingSet,

    /// Feature and target row counts differ.
    #[error("feature rows ({x_rows}) and target rows ({y_rows}) differ")]
    ShapeMismatch { x_rows: usize, y_rows: usize },

    /// Prediction input width does not match the fitted model.
    #[error("model expects {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    /// No artifact exists at the configured path.
    #[error("no model artifact at {path}")]
    ArtifactMissing { path: PathBuf },

    /// The file at the artifact path is not a tabpipe model.
    #[error("artifact is not a tabpipe model (bad magic)")]
    BadMagic,

    /// The artifact was written by an incompatible version of the format.
    #[error("unsupported artifact version {0}")]
    UnsupportedVersion(u32),

    #[error(transparent)]
    Codec(#[from] bincode::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Metadata carried alongside the fitted parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Human-readable model name, used in the evaluation report.
    pub model_name: String,
    /// Number of input features the model was fitted on.
    pub n_features: usize,
    /// Feature names in training order (if known).
    pub feature_names: Option<Vec<String>>,
}

impl ModelMeta {
    /// Metadata for a freshly fitted model.
    pub fn new(model_name: impl Into<String>, n_features: usize) -> Self {
        Self {
            model_name: model_name.into(),
            n_features,
            feature_names: None,
        }
    }

    /// Attach feature names.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }
}
