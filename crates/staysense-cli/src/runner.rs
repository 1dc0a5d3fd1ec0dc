//! Batch runner: read records, fit, transform, predict, write

use crate::config::CliConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use staysense_sdk::{
    BookingRequest, CancellationPredictor, FeatureMatrix, Frame, LinearClassifier,
    PipelineConfig, Prediction, Preprocessor, Transformer,
};
use std::path::Path;
use tracing::{debug, info};

/// Output document of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub features: FeatureMatrix,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<Prediction>>,
}

/// Read a JSON array of records
pub fn read_records(path: &Path) -> Result<Vec<JsonValue>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records: Vec<JsonValue> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of records", path.display()))?;
    debug!(records = records.len(), "Read {}", path.display());
    Ok(records)
}

/// Split labeled records into a booking batch and its label vector
pub fn training_batch(records: &[JsonValue], label_column: &str) -> Result<(Frame, Vec<f64>)> {
    let labels = records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            let label = record
                .get(label_column)
                .ok_or_else(|| anyhow!("record {} has no '{}' field", row, label_column))?;
            label
                .as_f64()
                .or_else(|| label.as_bool().map(|b| if b { 1.0 } else { 0.0 }))
                .ok_or_else(|| anyhow!("record {} has a non-numeric label: {}", row, label))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((booking_batch(records)?, labels))
}

/// Parse records into a booking batch; absent fields take form defaults
pub fn booking_batch(records: &[JsonValue]) -> Result<Frame> {
    let requests = records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            BookingRequest::deserialize(record)
                .with_context(|| format!("record {} is not a valid booking", row))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(BookingRequest::to_frame(&requests)?)
}

/// Execute one configured run
pub fn run(config: &CliConfig) -> Result<Report> {
    let training_path = config
        .training_path
        .as_deref()
        .ok_or_else(|| anyhow!("training_path is not configured (set STAYSENSE_TRAINING_PATH)"))?;

    let pipeline = match &config.pipeline_config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load pipeline config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    let (train, labels) = training_batch(&read_records(training_path)?, &config.label_column)?;
    let mut preprocessor = Preprocessor::new(pipeline)?;
    preprocessor
        .fit(&train, Some(&labels))
        .context("Failed to fit preprocessor")?;
    info!(
        rows = train.n_rows(),
        features = preprocessor.feature_names()?.len(),
        "Preprocessor fitted"
    );

    let input = match config.scoring_path() {
        Some(path) if path != training_path => booking_batch(&read_records(path)?)?,
        _ => train,
    };
    let features = preprocessor.transform_matrix(&input)?;

    let predictions = match &config.model_path {
        Some(path) => {
            let model = LinearClassifier::from_file(path)
                .with_context(|| format!("Failed to load model {}", path.display()))?;
            let predictor = CancellationPredictor::new(preprocessor, model)?;
            Some(predictor.predict(&input)?)
        }
        None => None,
    };

    Ok(Report {
        features,
        predictions,
    })
}

/// Write the report as pretty JSON to a file or stdout
pub fn write_report(report: &Report, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote report to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
