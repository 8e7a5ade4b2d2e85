//! Deterministic synthetic data for tests.
//!
//! Generators are seeded and pure: the same seed always yields the same
//! dataset, which the determinism tests rely on.

use std::io::Write;
use std::path::Path;

use ndarray::{Array1, Array2};
use rand::prelude::*;

use crate::data::Dataset;

/// Generate a linearly separable binary problem.
///
/// Features are uniform in `[-1, 1]`; the label is the sign of a random
/// linear score with a little noise. Returns `(x, y)` with `x` shaped
/// `[n_rows, n_features]`.
pub fn synthetic_binary(n_rows: usize, n_features: usize, seed: u64) -> (Array2<f32>, Array1<f32>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let coefs: Vec<f32> = (0..n_features)
        .map(|_| rng.gen::<f32>() * 2.0 - 1.0)
        .collect();

    let mut x = Array2::<f32>::zeros((n_rows, n_features));
    let mut y = Array1::<f32>::zeros(n_rows);
    for r in 0..n_rows {
        let mut score = 0.0f32;
        for c in 0..n_features {
            let v = rng.gen::<f32>() * 2.0 - 1.0;
            x[[r, c]] = v;
            score += v * coefs[c];
        }
        score += (rng.gen::<f32>() * 2.0 - 1.0) * 0.05;
        y[r] = if score > 0.0 { 1.0 } else { 0.0 };
    }

    (x, y)
}

/// Generate a full [`Dataset`] with columns `f0..fN` and a trailing `target`
/// column, optionally punching NaN holes into the feature cells.
pub fn synthetic_dataset(
    n_rows: usize,
    n_features: usize,
    missing_fraction: f32,
    seed: u64,
) -> Dataset {
    let (x, y) = synthetic_binary(n_rows, n_features, seed);
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));

    let mut values = Array2::<f32>::zeros((n_rows, n_features + 1));
    for r in 0..n_rows {
        for c in 0..n_features {
            values[[r, c]] = if rng.gen::<f32>() < missing_fraction {
                f32::NAN
            } else {
                x[[r, c]]
            };
        }
        values[[r, n_features]] = y[r];
    }

    let mut columns: Vec<String> = (0..n_features).map(|c| format!("f{c}")).collect();
    columns.push("target".to_string());

    Dataset::new(columns, values).expect("generated column count matches matrix width")
}

/// Write a dataset as headered CSV, NaN cells as empty fields.
pub fn write_csv(dataset: &Dataset, path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{}", dataset.column_names().join(","))?;
    for r in 0..dataset.n_rows() {
        let fields: Vec<String> = dataset
            .row(r)
            .iter()
            .map(|v| if v.is_nan() { String::new() } else { v.to_string() })
            .collect();
        writeln!(file, "{}", fields.join(","))?;
    }
    Ok(())
}
