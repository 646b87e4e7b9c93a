//! Prediction results and response envelopes

use serde::Serialize;

/// Classifier output for one row. Class 1 means the engine needs maintenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub predicted_class: u8,
    pub failure_probability: f64,
}

/// Index-aligned results for a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub results: Vec<PredictionResult>,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub status: &'static str,
    pub prediction: u8,
    pub probability: f64,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            status: "success",
            prediction: result.predicted_class,
            probability: result.failure_probability,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchPredictionResponse {
    pub status: &'static str,
    pub total_records: usize,
    pub predictions: Vec<u8>,
    pub probabilities: Vec<f64>,
}

impl From<BatchResult> for BatchPredictionResponse {
    fn from(batch: BatchResult) -> Self {
        let (predictions, probabilities) = batch
            .results
            .iter()
            .map(|r| (r.predicted_class, r.failure_probability))
            .unzip::<_, _, Vec<_>, Vec<_>>();

        Self {
            status: "success",
            total_records: predictions.len(),
            predictions,
            probabilities,
        }
    }
}
