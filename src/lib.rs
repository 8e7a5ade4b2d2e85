//! tabpipe: a batch training pipeline for tabular binary classification.
//!
//! One run of the pipeline loads a CSV source, splits it into train and test
//! sets, cleans both splits, fits a classifier, persists the model artifact,
//! and evaluates it on the held-out split.
//!
//! # Stages
//!
//! - [`Ingestion`] - Load the source and produce the train/test split
//! - [`Cleaner`] - Deterministic, idempotent data cleaning
//! - [`Trainer`] - Feature/target split, model fitting, artifact persistence
//! - [`Predictor`] - Artifact loading and held-out evaluation
//!
//! Stages run strictly in that order; [`pipeline::run`] wires them together
//! the same way the `tabpipe` binary does.
//!
//! # Data Handling
//!
//! Tabular data lives in [`Dataset`], a named-column `f32` matrix. Missing
//! values are represented as `f32::NAN` throughout the data layer.

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod testing;

// High-level pipeline types
pub use pipeline::{Cleaner, Evaluation, Ingestion, Predictor, RunReport, Trainer};

// Configuration
pub use config::{PipelineConfig, TrainParams};

// Data and model types
pub use data::{Dataset, DatasetError};
pub use model::{LogisticModel, ModelError, ModelMeta};

// Errors
pub use error::PipelineError;
