//! CSV ingestion.
//!
//! The source file must have a header row naming every column. Cells are
//! parsed as `f32`; an empty cell or a missing-value sentinel (`NA`, `?`)
//! becomes `f32::NAN`. Any other non-numeric cell is a hard error, which the
//! pipeline propagates rather than repairs.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use ndarray::Array2;

use super::{Dataset, DatasetError};

/// Cell values treated as missing, in addition to the empty string.
const MISSING_SENTINELS: [&str; 2] = ["NA", "?"];

/// Read a headered CSV file into a [`Dataset`].
pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    let n_columns = columns.len();

    let mut cells: Vec<f32> = Vec::new();
    let mut n_rows = 0;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != n_columns {
            return Err(DatasetError::RaggedRow {
                row,
                expected: n_columns,
                actual: record.len(),
            });
        }
        for (col, field) in record.iter().enumerate() {
            let value = parse_cell(field).ok_or_else(|| DatasetError::BadValue {
                row,
                column: columns[col].clone(),
                value: field.to_string(),
            })?;
            cells.push(value);
        }
        n_rows += 1;
    }

    let values = Array2::from_shape_vec((n_rows, n_columns), cells)
        .expect("cell count matches rows * columns");
    Dataset::new(columns, values)
}

fn parse_cell(field: &str) -> Option<f32> {
    let field = field.trim();
    if field.is_empty() || MISSING_SENTINELS.contains(&field) {
        return Some(f32::NAN);
    }
    field.parse::<f32>().ok()
}
