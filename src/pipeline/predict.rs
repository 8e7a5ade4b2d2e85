//! Prediction and evaluation stage.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::config::PipelineConfig;
use crate::data::Dataset;
use crate::error::PipelineError;
use crate::metrics::{self, ClassificationReport, DEFAULT_THRESHOLD};
use crate::model::LogisticModel;

/// Held-out evaluation results for one run.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Accuracy at the default threshold, in `[0, 1]`.
    pub accuracy: f64,
    /// Per-class precision/recall/F1 report; `Display` gives the text block.
    pub class_report: ClassificationReport,
    /// ROC-AUC, in `[0, 1]`.
    pub roc_auc: f64,
}

/// Loads the persisted model and evaluates it on held-out data.
///
/// Fails if no artifact exists at the configured path; evaluation never
/// falls back to default metrics.
pub struct Predictor {
    config: PipelineConfig,
}

impl Predictor {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Split a cleaned dataset into features and target by the configured
    /// label column. Identical contract to the trainer's separator.
    pub fn feature_target_separator(
        &self,
        dataset: &Dataset,
    ) -> Result<(Array2<f32>, Array1<f32>), PipelineError> {
        Ok(dataset.separate_features(&self.config.target_column)?)
    }

    /// Load the artifact and compute accuracy, the classification report,
    /// and ROC-AUC against the held-out labels.
    pub fn evaluate_model(
        &self,
        x: ArrayView2<f32>,
        y: ArrayView1<f32>,
    ) -> Result<Evaluation, PipelineError> {
        let model = LogisticModel::load(&self.config.model_path)?;
        let probs = model.predict_proba(x)?;

        Ok(Evaluation {
            accuracy: metrics::accuracy(probs.view(), y, DEFAULT_THRESHOLD),
            class_report: ClassificationReport::from_predictions(probs.view(), y, DEFAULT_THRESHOLD),
            roc_auc: metrics::roc_auc(probs.view(), y),
        })
    }
}
