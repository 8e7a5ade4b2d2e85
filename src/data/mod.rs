//! Tabular data containers.
//!
//! [`Dataset`] is a sample-major `f32` matrix with named columns. Missing
//! values are represented as `f32::NAN`; the CSV reader in [`io`] maps empty
//! cells and missing-value sentinels to NaN on the way in, and the cleaning
//! stage is responsible for removing them before training.

mod dataset;
pub mod io;

pub use dataset::{Dataset, DatasetError};
pub use io::read_csv;
