//! Pipeline stages and orchestration.
//!
//! One run executes four stages in a fixed order: [`Ingestion`] loads and
//! splits the source, [`Cleaner`] normalizes both splits, [`Trainer`] fits
//! and persists the model, [`Predictor`] loads the artifact and evaluates it
//! on the held-out split. [`run`] wires them together exactly the way the
//! `tabpipe` binary does.

mod clean;
mod ingest;
mod predict;
mod train;

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::PipelineError;

pub use clean::Cleaner;
pub use ingest::Ingestion;
pub use predict::{Evaluation, Predictor};
pub use train::Trainer;

/// Result of one full pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Name of the trained model, for the console report.
    pub model_name: String,
    /// Held-out evaluation results.
    pub evaluation: Evaluation,
}

/// Execute one full pipeline run.
pub fn run(config: &PipelineConfig) -> Result<RunReport, PipelineError> {
    let ingestion = Ingestion::new(config);
    let (train, test) = ingestion.load_data()?;
    info!("data ingestion completed successfully");

    let cleaner = Cleaner::new(config);
    let train_data = cleaner.clean_data(train)?;
    let test_data = cleaner.clean_data(test)?;
    info!("data cleaning completed successfully");

    let mut trainer = Trainer::new(config);
    let (x_train, y_train) = trainer.feature_target_separator(&train_data)?;
    trainer.train_model(x_train.view(), y_train.view())?;
    trainer.save_model()?;
    info!("model training completed successfully");

    let predictor = Predictor::new(config);
    let (x_test, y_test) = predictor.feature_target_separator(&test_data)?;
    let evaluation = predictor.evaluate_model(x_test.view(), y_test.view())?;
    info!("model evaluation completed successfully");

    Ok(RunReport {
        model_name: trainer.model_name().to_string(),
        evaluation,
    })
}
