//! tabpipe binary: one batch training run, no flags.

use anyhow::Result;

use tabpipe::config::PipelineConfig;
use tabpipe::pipeline;

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = PipelineConfig::default();
    let report = pipeline::run(&config)?;

    println!("\n============= Model Evaluation Results ==============");
    println!("Model: {}", report.model_name);
    println!(
        "Accuracy Score: {:.4}, ROC AUC Score: {:.4}",
        report.evaluation.accuracy, report.evaluation.roc_auc
    );
    println!("\n{}", report.evaluation.class_report);
    println!("=====================================================\n");

    Ok(())
}
