//! Training stage.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::config::PipelineConfig;
use crate::data::Dataset;
use crate::error::PipelineError;
use crate::model::{LogisticModel, ModelError, MODEL_NAME};

/// Fits the classifier and persists the artifact.
///
/// `save_model` requires a prior successful `train_model` call; calling it
/// first is a [`ModelError::NotFitted`]-style failure, not a silent no-op.
pub struct Trainer {
    config: PipelineConfig,
    model_name: &'static str,
    model: Option<LogisticModel>,
    feature_names: Option<Vec<String>>,
}

impl Trainer {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            config: config.clone(),
            model_name: MODEL_NAME,
            model: None,
            feature_names: None,
        }
    }

    /// Split a cleaned dataset into features and target by the configured
    /// label column. The returned pair always has `dataset.n_rows()` rows.
    ///
    /// Also records the feature names so they travel with the artifact.
    pub fn feature_target_separator(
        &mut self,
        dataset: &Dataset,
    ) -> Result<(Array2<f32>, Array1<f32>), PipelineError> {
        let pair = dataset.separate_features(&self.config.target_column)?;
        self.feature_names = Some(dataset.feature_names(&self.config.target_column));
        Ok(pair)
    }

    /// Fit the classifier on the given features and targets.
    pub fn train_model(
        &mut self,
        x: ArrayView2<f32>,
        y: ArrayView1<f32>,
    ) -> Result<(), PipelineError> {
        let mut model = LogisticModel::train(x, y, &self.config.train)?;
        if let Some(names) = &self.feature_names {
            model = model.with_feature_names(names.clone());
        }
        self.model = Some(model);
        Ok(())
    }

    /// Persist the fitted model to the configured artifact path, overwriting
    /// any existing artifact. Errors if `train_model` has not run.
    pub fn save_model(&self) -> Result<(), PipelineError> {
        let model = self.model.as_ref().ok_or(ModelError::NotFitted)?;
        model.save(&self.config.model_path)?;
        Ok(())
    }

    /// Name of the classifier, recorded for the evaluation report.
    pub fn model_name(&self) -> &str {
        self.model_name
    }

    /// The fitted model, if training has run.
    pub fn model(&self) -> Option<&LogisticModel> {
        self.model.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::synthetic_dataset;

    fn config_with_model_path(name: &str) -> PipelineConfig {
        PipelineConfig {
            model_path: std::env::temp_dir().join(name),
            ..Default::default()
        }
    }

    #[test]
    fn save_before_train_fails() {
        let trainer = Trainer::new(&config_with_model_path("tabpipe_trainer_unfitted.bin"));
        assert!(matches!(
            trainer.save_model(),
            Err(PipelineError::Model(ModelError::NotFitted))
        ));
    }

    #[test]
    fn separator_matches_dataset_rows() {
        let ds = synthetic_dataset(30, 4, 0.0, 2);
        let mut trainer = Trainer::new(&PipelineConfig::default());
        let (x, y) = trainer.feature_target_separator(&ds).unwrap();
        assert_eq!(x.nrows(), 30);
        assert_eq!(y.len(), 30);
        assert_eq!(x.ncols(), 4);
    }

    #[test]
    fn train_then_save_writes_artifact() {
        let config = config_with_model_path("tabpipe_trainer_artifact.bin");
        let ds = synthetic_dataset(60, 3, 0.0, 13);

        let mut trainer = Trainer::new(&config);
        let (x, y) = trainer.feature_target_separator(&ds).unwrap();
        trainer.train_model(x.view(), y.view()).unwrap();
        trainer.save_model().unwrap();

        let loaded = LogisticModel::load(&config.model_path).unwrap();
        std::fs::remove_file(&config.model_path).ok();

        assert_eq!(loaded.n_features(), 3);
        assert_eq!(
            loaded.meta().feature_names,
            Some(vec!["f0".to_string(), "f1".to_string(), "f2".to_string()])
        );
    }

    #[test]
    fn model_name_is_recorded() {
        let trainer = Trainer::new(&PipelineConfig::default());
        assert_eq!(trainer.model_name(), "LogisticRegression");
    }
}
