//! Evaluation metrics for binary classification.
//!
//! Predictions are positive-class probabilities; labels are 0/1. Metrics
//! return `f64` regardless of the `f32` inputs.

use std::fmt;

use ndarray::ArrayView1;

/// Probability threshold used when metrics need a hard class decision.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Proportion of correct predictions at the given threshold.
pub fn accuracy(probs: ArrayView1<f32>, labels: ArrayView1<f32>, threshold: f32) -> f64 {
    let n = probs.len();
    if n == 0 {
        return 0.0;
    }
    let correct = probs
        .iter()
        .zip(labels.iter())
        .filter(|(&p, &l)| {
            let predicted = if p >= threshold { 1.0 } else { 0.0 };
            (predicted - l).abs() < 0.5
        })
        .count();
    correct as f64 / n as f64
}

/// Area under the ROC curve.
///
/// Rank-based: equivalent to the probability that a random positive scores
/// above a random negative, with ties counted as half. Returns 0.5 when
/// either class is absent, since ranking quality is undefined there.
pub fn roc_auc(probs: ArrayView1<f32>, labels: ArrayView1<f32>) -> f64 {
    let n = probs.len();
    if n == 0 {
        return 0.5;
    }

    let n_pos = labels.iter().filter(|&&l| l > 0.5).count();
    let n_neg = n - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.5;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        probs[a]
            .partial_cmp(&probs[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Walk score groups in ascending order; each positive beats every
    // negative seen so far and half of the negatives tied with it.
    let mut concordant = 0.0f64;
    let mut negatives_below = 0.0f64;
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && (probs[order[i]] - probs[order[j]]).abs() < 1e-10 {
            j += 1;
        }

        let mut group_pos = 0.0f64;
        let mut group_neg = 0.0f64;
        for &idx in &order[i..j] {
            if labels[idx] > 0.5 {
                group_pos += 1.0;
            } else {
                group_neg += 1.0;
            }
        }

        concordant += group_pos * (negatives_below + 0.5 * group_neg);
        negatives_below += group_neg;
        i = j;
    }

    concordant / (n_pos as f64 * n_neg as f64)
}

/// Precision, recall, F1, and support for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    /// Class label (0 or 1).
    pub label: u32,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true instances of this class.
    pub support: usize,
}

/// Per-class quality report with macro and weighted averages.
///
/// `Display` renders the familiar fixed-width text block.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub total_support: usize,
}

impl ClassificationReport {
    /// Build a report from probabilities and true labels at the given
    /// threshold.
    pub fn from_predictions(
        probs: ArrayView1<f32>,
        labels: ArrayView1<f32>,
        threshold: f32,
    ) -> Self {
        let classes = [0u32, 1u32]
            .iter()
            .map(|&label| class_metrics(probs, labels, threshold, label))
            .collect();

        Self {
            classes,
            accuracy: accuracy(probs, labels, threshold),
            total_support: labels.len(),
        }
    }

    /// Unweighted mean of `(precision, recall, f1)` over classes.
    pub fn macro_avg(&self) -> (f64, f64, f64) {
        let n = self.classes.len() as f64;
        if n == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let sum = self.classes.iter().fold((0.0, 0.0, 0.0), |acc, c| {
            (acc.0 + c.precision, acc.1 + c.recall, acc.2 + c.f1)
        });
        (sum.0 / n, sum.1 / n, sum.2 / n)
    }

    /// Support-weighted mean of `(precision, recall, f1)` over classes.
    pub fn weighted_avg(&self) -> (f64, f64, f64) {
        let total = self.total_support as f64;
        if total == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let sum = self.classes.iter().fold((0.0, 0.0, 0.0), |acc, c| {
            let w = c.support as f64;
            (
                acc.0 + w * c.precision,
                acc.1 + w * c.recall,
                acc.2 + w * c.f1,
            )
        });
        (sum.0 / total, sum.1 / total, sum.2 / total)
    }
}

fn class_metrics(
    probs: ArrayView1<f32>,
    labels: ArrayView1<f32>,
    threshold: f32,
    label: u32,
) -> ClassMetrics {
    let mut true_pos = 0usize;
    let mut false_pos = 0usize;
    let mut false_neg = 0usize;
    let mut support = 0usize;

    for (&p, &l) in probs.iter().zip(labels.iter()) {
        let predicted = u32::from(p >= threshold);
        let actual = u32::from(l > 0.5);
        if actual == label {
            support += 1;
        }
        match (predicted == label, actual == label) {
            (true, true) => true_pos += 1,
            (true, false) => false_pos += 1,
            (false, true) => false_neg += 1,
            (false, false) => {}
        }
    }

    let precision = ratio(true_pos, true_pos + false_pos);
    let recall = ratio(true_pos, true_pos + false_neg);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassMetrics {
        label,
        precision,
        recall,
        f1,
        support,
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12}  {:>9}  {:>9}  {:>9}  {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>12}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12}  {:>9}  {:>9}  {:>9.2}  {:>9}",
            "accuracy", "", "", self.accuracy, self.total_support
        )?;
        let (mp, mr, mf) = self.macro_avg();
        writeln!(
            f,
            "{:>12}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}",
            "macro avg", mp, mr, mf, self.total_support
        )?;
        let (wp, wr, wf) = self.weighted_avg();
        write!(
            f,
            "{:>12}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9}",
            "weighted avg", wp, wr, wf, self.total_support
        )
    }
}
