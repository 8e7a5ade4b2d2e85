//! Ingestion stage.

use crate::config::PipelineConfig;
use crate::data::{read_csv, Dataset, DatasetError};
use crate::error::PipelineError;

/// Loads the configured CSV source and produces the train/test split.
///
/// Failure is terminal: an unreadable or malformed source, or one too small
/// to split, propagates as an error.
pub struct Ingestion {
    config: PipelineConfig,
}

impl Ingestion {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Load the source and return `(train, test)`.
    ///
    /// The split is a seeded shuffle, so identical config and source yield
    /// identical splits across runs.
    pub fn load_data(&self) -> Result<(Dataset, Dataset), PipelineError> {
        self.config.validate()?;

        let full = read_csv(&self.config.source_path)?;
        if full.n_rows() == 0 {
            return Err(DatasetError::Empty.into());
        }

        let (train, test) = full.split(self.config.test_fraction, self.config.split_seed)?;
        Ok((train, test))
    }
}
