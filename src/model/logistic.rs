//! Logistic regression fitted with full-batch gradient descent.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::config::TrainParams;

use super::{ModelError, ModelMeta};

/// Name recorded in metadata and printed in the evaluation report.
pub const MODEL_NAME: &str = "LogisticRegression";

/// A fitted binary logistic-regression classifier.
///
/// Inputs are standardized internally: per-feature mean and standard
/// deviation are estimated at fit time, stored with the model, and applied
/// again at prediction time. Training is deterministic; there is no random
/// initialization and no sampling.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    weights: Array1<f32>,
    bias: f32,
    /// Per-feature standardization statistics from the training set.
    feature_means: Array1<f32>,
    feature_stds: Array1<f32>,
    meta: ModelMeta,
}

impl LogisticModel {
    /// Fit a model on a feature matrix `[n_rows, n_features]` and a 0/1
    /// target vector of the same row count.
    pub fn train(
        x: ArrayView2<f32>,
        y: ArrayView1<f32>,
        params: &TrainParams,
    ) -> Result<Self, ModelError> {
        if x.nrows() == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }
        if x.nrows() != y.len() {
            return Err(ModelError::ShapeMismatch {
                x_rows: x.nrows(),
                y_rows: y.len(),
            });
        }

        let (feature_means, feature_stds) = standardization_stats(x);
        let x = standardize(x, &feature_means, &feature_stds);

        let n_rows = x.nrows() as f32;
        let mut weights = Array1::<f32>::zeros(x.ncols());
        let mut bias = 0.0f32;

        for _ in 0..params.n_epochs {
            let margins = x.dot(&weights) + bias;
            let residuals = margins.mapv(sigmoid) - y;

            let mut grad_w = x.t().dot(&residuals);
            grad_w.mapv_inplace(|g| g / n_rows);
            if params.l2_penalty > 0.0 {
                grad_w.scaled_add(params.l2_penalty, &weights);
            }
            let grad_b = residuals.sum() / n_rows;

            weights.scaled_add(-params.learning_rate, &grad_w);
            bias -= params.learning_rate * grad_b;
        }

        let meta = ModelMeta::new(MODEL_NAME, x.ncols());
        Ok(Self {
            weights,
            bias,
            feature_means,
            feature_stds,
            meta,
        })
    }

    /// Rebuild a model from persisted parameters.
    pub(super) fn from_parts(
        weights: Array1<f32>,
        bias: f32,
        feature_means: Array1<f32>,
        feature_stds: Array1<f32>,
        meta: ModelMeta,
    ) -> Self {
        Self {
            weights,
            bias,
            feature_means,
            feature_stds,
            meta,
        }
    }

    /// Predicted positive-class probability for each row of `x`.
    pub fn predict_proba(&self, x: ArrayView2<f32>) -> Result<Array1<f32>, ModelError> {
        if x.ncols() != self.meta.n_features {
            return Err(ModelError::FeatureMismatch {
                expected: self.meta.n_features,
                actual: x.ncols(),
            });
        }
        let x = standardize(x, &self.feature_means, &self.feature_stds);
        Ok((x.dot(&self.weights) + self.bias).mapv(sigmoid))
    }

    /// Model metadata.
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// Model name for reporting.
    pub fn model_name(&self) -> &str {
        &self.meta.model_name
    }

    /// Number of input features.
    pub fn n_features(&self) -> usize {
        self.meta.n_features
    }

    /// Fitted weights (one per feature, in standardized space).
    pub fn weights(&self) -> ArrayView1<'_, f32> {
        self.weights.view()
    }

    /// Fitted intercept.
    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// Standardization statistics `(means, stds)` from the training set.
    pub fn scaling(&self) -> (ArrayView1<'_, f32>, ArrayView1<'_, f32>) {
        (self.feature_means.view(), self.feature_stds.view())
    }

    /// Attach feature names to the metadata.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.meta.feature_names = Some(names);
        self
    }
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

/// Per-feature mean and standard deviation. A constant feature gets a unit
/// standard deviation so standardization stays a no-op for it.
fn standardization_stats(x: ArrayView2<f32>) -> (Array1<f32>, Array1<f32>) {
    let n_rows = x.nrows() as f32;
    let means = x.sum_axis(ndarray::Axis(0)) / n_rows;

    let mut stds = Array1::<f32>::zeros(x.ncols());
    for c in 0..x.ncols() {
        let mean = means[c];
        let var = x.column(c).iter().map(|&v| (v - mean).powi(2)).sum::<f32>() / n_rows;
        let std = var.sqrt();
        stds[c] = if std > 0.0 { std } else { 1.0 };
    }
    (means, stds)
}

fn standardize(
    x: ArrayView2<f32>,
    means: &Array1<f32>,
    stds: &Array1<f32>,
) -> Array2<f32> {
    let mut out = x.to_owned();
    for mut row in out.rows_mut() {
        row -= means;
        row /= stds;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::testing::synthetic_binary;

    fn default_params() -> TrainParams {
        TrainParams::default()
    }

    #[test]
    fn rejects_empty_input() {
        let x = Array2::<f32>::zeros((0, 3));
        let y = Array1::<f32>::zeros(0);
        assert!(matches!(
            LogisticModel::train(x.view(), y.view(), &default_params()),
            Err(ModelError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn rejects_mismatched_rows() {
        let x = Array2::<f32>::zeros((4, 2));
        let y = Array1::<f32>::zeros(3);
        assert!(matches!(
            LogisticModel::train(x.view(), y.view(), &default_params()),
            Err(ModelError::ShapeMismatch { x_rows: 4, y_rows: 3 })
        ));
    }

    #[test]
    fn separates_linearly_separable_data() {
        let (x, y) = synthetic_binary(200, 3, 11);
        let model = LogisticModel::train(x.view(), y.view(), &default_params()).unwrap();
        let probs = model.predict_proba(x.view()).unwrap();

        let correct = probs
            .iter()
            .zip(y.iter())
            .filter(|(&p, &l)| {
                let predicted = if p >= 0.5 { 1.0 } else { 0.0 };
                (predicted - l).abs() < 0.5
            })
            .count();
        assert!(correct as f32 / y.len() as f32 > 0.9);
    }

    #[test]
    fn training_is_deterministic() {
        let (x, y) = synthetic_binary(120, 4, 3);
        let a = LogisticModel::train(x.view(), y.view(), &default_params()).unwrap();
        let b = LogisticModel::train(x.view(), y.view(), &default_params()).unwrap();

        assert_eq!(a.weights().to_vec(), b.weights().to_vec());
        assert_eq!(a.bias(), b.bias());
    }

    #[test]
    fn predict_checks_feature_count() {
        let (x, y) = synthetic_binary(50, 3, 5);
        let model = LogisticModel::train(x.view(), y.view(), &default_params()).unwrap();

        let narrow = Array2::<f32>::zeros((2, 2));
        assert!(matches!(
            model.predict_proba(narrow.view()),
            Err(ModelError::FeatureMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn probabilities_are_valid() {
        let (x, y) = synthetic_binary(80, 2, 9);
        let model = LogisticModel::train(x.view(), y.view(), &default_params()).unwrap();
        for &p in model.predict_proba(x.view()).unwrap().iter() {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn constant_feature_does_not_blow_up() {
        let x = ndarray::array![[1.0, 5.0], [2.0, 5.0], [3.0, 5.0], [4.0, 5.0]];
        let y = ndarray::array![0.0, 0.0, 1.0, 1.0];
        let model = LogisticModel::train(x.view(), y.view(), &default_params()).unwrap();
        let (_, stds) = model.scaling();
        assert_abs_diff_eq!(stds[1], 1.0);
        assert!(model.predict_proba(x.view()).unwrap().iter().all(|p| p.is_finite()));
    }
}
