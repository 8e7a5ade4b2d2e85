//! Dataset container.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::prelude::*;
use thiserror::Error;

/// Errors from dataset construction and access.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The source produced no data rows.
    #[error("dataset has no rows")]
    Empty,

    /// A named column does not exist.
    #[error("column not found: {0:?}")]
    ColumnNotFound(String),

    /// Column-name count does not match the value matrix width.
    #[error("{names} column names for a matrix with {columns} columns")]
    ColumnCountMismatch { names: usize, columns: usize },

    /// A CSV record had the wrong number of fields.
    #[error("row {row} has {actual} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A cell could not be parsed as a number.
    #[error("row {row}, column {column:?}: cannot parse {value:?} as a number")]
    BadValue {
        row: usize,
        column: String,
        value: String,
    },

    /// Too few rows to produce a non-empty train/test pair.
    #[error("cannot split {n_rows} rows into non-empty train and test sets")]
    TooSmallToSplit { n_rows: usize },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A tabular collection of rows with named columns.
///
/// Values are stored sample-major: `[n_rows, n_columns]`. Missing values are
/// `f32::NAN`.
///
/// # Example
///
/// ```
/// use tabpipe::data::Dataset;
/// use ndarray::array;
///
/// let ds = Dataset::new(
///     vec!["age".into(), "target".into()],
///     array![[34.0, 0.0], [51.0, 1.0], [29.0, 0.0]],
/// )
/// .unwrap();
///
/// assert_eq!(ds.n_rows(), 3);
/// let (x, y) = ds.separate_features("target").unwrap();
/// assert_eq!(x.nrows(), 3);
/// assert_eq!(y.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    values: Array2<f32>,
}

impl Dataset {
    /// Create a dataset from column names and a sample-major value matrix.
    pub fn new(columns: Vec<String>, values: Array2<f32>) -> Result<Self, DatasetError> {
        if columns.len() != values.ncols() {
            return Err(DatasetError::ColumnCountMismatch {
                names: columns.len(),
                columns: values.ncols(),
            });
        }
        Ok(Self { columns, values })
    }

    /// Number of data rows.
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns (features plus the target).
    pub fn n_columns(&self) -> usize {
        self.values.ncols()
    }

    /// All column names, in source order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// View of the full value matrix.
    pub fn values(&self) -> ArrayView2<'_, f32> {
        self.values.view()
    }

    /// View of one row.
    pub fn row(&self, index: usize) -> ArrayView1<'_, f32> {
        self.values.row(index)
    }

    /// Column names excluding the target column.
    pub fn feature_names(&self, target: &str) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.as_str() != target)
            .cloned()
            .collect()
    }

    /// Dataset containing the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut values = Array2::zeros((indices.len(), self.values.ncols()));
        for (out, &source) in indices.iter().enumerate() {
            values.row_mut(out).assign(&self.values.row(source));
        }
        Self {
            columns: self.columns.clone(),
            values,
        }
    }

    /// Split off the target column.
    ///
    /// Returns the feature matrix (all other columns, source order preserved)
    /// and the target vector. Both have exactly `n_rows` rows.
    pub fn separate_features(
        &self,
        target: &str,
    ) -> Result<(Array2<f32>, Array1<f32>), DatasetError> {
        let target_idx = self
            .column_index(target)
            .ok_or_else(|| DatasetError::ColumnNotFound(target.to_string()))?;

        let n_rows = self.values.nrows();
        let n_features = self.values.ncols() - 1;
        let mut x = Array2::zeros((n_rows, n_features));
        let mut y = Array1::zeros(n_rows);

        for (r, row) in self.values.rows().into_iter().enumerate() {
            let mut out = 0;
            for (c, &value) in row.iter().enumerate() {
                if c == target_idx {
                    y[r] = value;
                } else {
                    x[[r, out]] = value;
                    out += 1;
                }
            }
        }

        Ok((x, y))
    }

    /// Deterministic seeded train/test split.
    ///
    /// Rows are shuffled with a seeded RNG; the first `test_fraction` of the
    /// shuffled order becomes the test set. Errors if either side would be
    /// empty.
    pub fn split(&self, test_fraction: f32, seed: u64) -> Result<(Self, Self), DatasetError> {
        let n_rows = self.n_rows();
        let mut indices: Vec<usize> = (0..n_rows).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let n_test = ((n_rows as f32) * test_fraction).round() as usize;
        if n_test == 0 || n_test >= n_rows {
            return Err(DatasetError::TooSmallToSplit { n_rows });
        }

        let (test_idx, train_idx) = indices.split_at(n_test);
        Ok((self.select_rows(train_idx), self.select_rows(test_idx)))
    }
}
