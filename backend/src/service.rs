//! Prediction service
//!
//! Raw input -> validator -> classifier -> index-aligned results. The
//! classifier is shared read-only; the service holds no other state.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::inference::Classifier;
use crate::models::{BatchResult, FeatureFrame, PredictionResult, RawTable};
use crate::validation::validate_and_prepare;
use crate::{AppError, AppResult};

#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn Classifier>,
}

impl PredictionService {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn model_name(&self) -> &str {
        self.classifier.name()
    }

    /// Predict for one JSON record
    pub fn predict_record(&self, record: &Map<String, Value>) -> AppResult<PredictionResult> {
        let frame = validate_and_prepare(RawTable::from_json_record(record))?;
        let batch = self.infer(&frame)?;

        batch
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::InternalError("classifier returned no result".to_string()))
    }

    /// Predict for every row of an uploaded table
    pub fn predict_table(&self, table: RawTable) -> AppResult<BatchResult> {
        let frame = validate_and_prepare(table)?;
        self.infer(&frame)
    }

    fn infer(&self, frame: &FeatureFrame) -> AppResult<BatchResult> {
        let (classes, probabilities) = self.classifier.classify(frame)?;

        if classes.len() != frame.len() || probabilities.len() != frame.len() {
            return Err(AppError::InternalError(format!(
                "classifier output misaligned: {} rows, {} classes, {} probabilities",
                frame.len(),
                classes.len(),
                probabilities.len()
            )));
        }

        let results = classes
            .into_iter()
            .zip(probabilities)
            .enumerate()
            .map(|(row, (predicted_class, [_, positive]))| {
                if !(0.0..=1.0).contains(&positive) {
                    return Err(AppError::InternalError(format!(
                        "probability {} for row {} outside [0, 1]",
                        positive, row
                    )));
                }
                Ok(PredictionResult {
                    predicted_class,
                    failure_probability: positive,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(BatchResult { results })
    }
}
