//! Run configuration.
//!
//! The binary consumes no command-line flags; a run is fully described by
//! [`PipelineConfig`], which defaults to the checked-in sample dataset and a
//! fixed artifact path. Tests build custom configs directly or deserialize
//! them from serialized sources; unset fields fall back to the defaults.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Test fraction must leave rows on both sides of the split.
    #[error("test fraction must be in (0, 1), got {0}")]
    InvalidTestFraction(f32),

    /// The target column name must be non-empty.
    #[error("target column name is empty")]
    EmptyTargetColumn,

    /// Training must run at least one epoch.
    #[error("epoch count must be positive")]
    ZeroEpochs,

    /// Learning rate must be positive and finite.
    #[error("learning rate must be positive and finite, got {0}")]
    InvalidLearningRate(f32),
}

/// Full configuration for one pipeline run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// CSV source with a header row.
    pub source_path: PathBuf,
    /// Name of the label column in the source.
    pub target_column: String,
    /// Fraction of rows held out for evaluation.
    pub test_fraction: f32,
    /// Seed for the train/test shuffle.
    pub split_seed: u64,
    /// Where the fitted model artifact is written (overwritten each run).
    pub model_path: PathBuf,
    /// Classifier hyperparameters.
    pub train: TrainParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("data/customers.csv"),
            target_column: "target".to_string(),
            test_fraction: 0.2,
            split_seed: 42,
            model_path: PathBuf::from("models/classifier.bin"),
            train: TrainParams::default(),
        }
    }
}

impl PipelineConfig {
    /// Check that the configuration describes a runnable pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ConfigError::InvalidTestFraction(self.test_fraction));
        }
        if self.target_column.is_empty() {
            return Err(ConfigError::EmptyTargetColumn);
        }
        self.train.validate()
    }
}

/// Hyperparameters for the gradient-descent classifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainParams {
    /// Step size for full-batch gradient descent.
    pub learning_rate: f32,
    /// Number of passes over the training set.
    pub n_epochs: usize,
    /// L2 penalty on the weights (0 disables regularization).
    pub l2_penalty: f32,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            n_epochs: 300,
            l2_penalty: 0.0,
        }
    }
}

impl TrainParams {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.n_epochs == 0 {
            return Err(ConfigError::ZeroEpochs);
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }
}
