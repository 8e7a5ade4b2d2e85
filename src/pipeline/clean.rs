//! Cleaning stage.
//!
//! A fixed sequence of deterministic transforms:
//!
//! 1. drop rows whose target value is missing;
//! 2. impute remaining missing cells with the per-column median;
//! 3. drop exact duplicate rows.
//!
//! Duplicates are detected after imputation, so a row whose filled-in cells
//! land on an existing row collapses into it in the same pass. The output
//! has no missing cells and no duplicates, which makes the sequence
//! idempotent: `clean_data(clean_data(d)) == clean_data(d)`.

use std::collections::HashSet;

use ndarray::Array2;

use crate::config::PipelineConfig;
use crate::data::{Dataset, DatasetError};
use crate::error::PipelineError;

/// Applies the fixed cleaning sequence to a dataset.
///
/// Pure function of its input; holds no state across calls.
pub struct Cleaner {
    target_column: String,
}

impl Cleaner {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            target_column: config.target_column.clone(),
        }
    }

    /// Clean one dataset. Errors if the target column is absent.
    pub fn clean_data(&self, dataset: Dataset) -> Result<Dataset, PipelineError> {
        let dataset = drop_unlabeled_rows(&dataset, &self.target_column)?;
        let dataset = impute_missing(dataset);
        Ok(drop_duplicate_rows(&dataset))
    }
}

/// Keep the first occurrence of each distinct row. Rows are keyed by the bit
/// patterns of their cells, so comparison is exact and hashable.
fn drop_duplicate_rows(dataset: &Dataset) -> Dataset {
    let mut seen: HashSet<Vec<u32>> = HashSet::new();
    let mut keep = Vec::new();
    for r in 0..dataset.n_rows() {
        let key: Vec<u32> = dataset.row(r).iter().map(|v| v.to_bits()).collect();
        if seen.insert(key) {
            keep.push(r);
        }
    }
    dataset.select_rows(&keep)
}

/// Drop rows whose target cell is NaN. A missing label cannot be imputed.
fn drop_unlabeled_rows(dataset: &Dataset, target: &str) -> Result<Dataset, DatasetError> {
    let target_idx = dataset
        .column_index(target)
        .ok_or_else(|| DatasetError::ColumnNotFound(target.to_string()))?;

    let keep: Vec<usize> = (0..dataset.n_rows())
        .filter(|&r| !dataset.values()[[r, target_idx]].is_nan())
        .collect();
    Ok(dataset.select_rows(&keep))
}

/// Replace each remaining NaN with the median of its column's non-NaN
/// values. A column with no observed values falls back to zero.
fn impute_missing(dataset: Dataset) -> Dataset {
    let values = dataset.values();
    let medians: Vec<f32> = (0..dataset.n_columns())
        .map(|c| column_median(values.column(c).iter().copied()))
        .collect();

    let mut filled: Array2<f32> = values.to_owned();
    for mut row in filled.rows_mut() {
        for (c, cell) in row.iter_mut().enumerate() {
            if cell.is_nan() {
                *cell = medians[c];
            }
        }
    }

    Dataset::new(dataset.column_names().to_vec(), filled)
        .expect("column names unchanged by imputation")
}

fn column_median(values: impl Iterator<Item = f32>) -> f32 {
    let mut observed: Vec<f32> = values.filter(|v| !v.is_nan()).collect();
    if observed.is_empty() {
        return 0.0;
    }
    observed.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = observed.len();
    if n % 2 == 0 {
        (observed[n / 2 - 1] + observed[n / 2]) / 2.0
    } else {
        observed[n / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn cleaner() -> Cleaner {
        Cleaner::new(&PipelineConfig::default())
    }

    fn dataset(values: Array2<f32>) -> Dataset {
        let columns = vec!["a".into(), "b".into(), "target".into()];
        Dataset::new(columns, values).unwrap()
    }

    #[test]
    fn drops_exact_duplicates() {
        let ds = dataset(array![
            [1.0, 2.0, 0.0],
            [1.0, 2.0, 0.0],
            [3.0, 4.0, 1.0],
        ]);
        let cleaned = cleaner().clean_data(ds).unwrap();
        assert_eq!(cleaned.n_rows(), 2);
    }

    #[test]
    fn drops_nan_duplicates() {
        let ds = dataset(array![
            [f32::NAN, 2.0, 0.0],
            [f32::NAN, 2.0, 0.0],
            [3.0, 4.0, 1.0],
        ]);
        let cleaned = cleaner().clean_data(ds).unwrap();
        assert_eq!(cleaned.n_rows(), 2);
    }

    #[test]
    fn drops_rows_with_missing_target() {
        let ds = dataset(array![
            [1.0, 2.0, f32::NAN],
            [3.0, 4.0, 1.0],
            [5.0, 6.0, 0.0],
        ]);
        let cleaned = cleaner().clean_data(ds).unwrap();
        assert_eq!(cleaned.n_rows(), 2);
        assert!(cleaned.values().iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn imputes_feature_median() {
        let ds = dataset(array![
            [1.0, 10.0, 0.0],
            [f32::NAN, 20.0, 1.0],
            [3.0, 30.0, 0.0],
        ]);
        let cleaned = cleaner().clean_data(ds).unwrap();
        // Median of {1.0, 3.0} is 2.0.
        assert_eq!(cleaned.values()[[1, 0]], 2.0);
    }

    #[test]
    fn imputed_row_collapses_into_existing_duplicate() {
        // Median of column b is 2.0, so imputing row 0 turns it into an
        // exact copy of row 1. One pass must already remove it.
        let ds = dataset(array![
            [1.0, f32::NAN, 0.0],
            [1.0, 2.0, 0.0],
            [3.0, 2.0, 1.0],
        ]);
        let c = cleaner();
        let once = c.clean_data(ds).unwrap();
        assert_eq!(once.n_rows(), 2);

        let twice = c.clean_data(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let ds = dataset(array![
            [1.0, f32::NAN, 0.0],
            [1.0, f32::NAN, 0.0],
            [2.0, 20.0, f32::NAN],
            [3.0, 30.0, 1.0],
            [4.0, 40.0, 1.0],
        ]);
        let c = cleaner();
        let once = c.clean_data(ds).unwrap();
        let twice = c.clean_data(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_dataset_passes_through() {
        let ds = dataset(array![[1.0, 10.0, 0.0], [2.0, 20.0, 1.0]]);
        let cleaned = cleaner().clean_data(ds.clone()).unwrap();
        assert_eq!(cleaned, ds);
    }

    #[test]
    fn missing_target_column_is_an_error() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into()],
            array![[1.0, 2.0]],
        )
        .unwrap();
        assert!(cleaner().clean_data(ds).is_err());
    }
}
