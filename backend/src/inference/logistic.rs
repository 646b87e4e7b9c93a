//! Logistic regression classifier loaded from a JSON artifact

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Classifier, ModelError};
use crate::models::{FeatureFrame, FEATURE_COLUMNS, FEATURE_COUNT};

fn default_threshold() -> f64 {
    0.5
}

/// On-disk artifact format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
    threshold: f64,
    name: String,
}

impl LogisticClassifier {
    pub fn new(model: LogisticModel) -> Result<Self, ModelError> {
        if model.feature_names.iter().map(String::as_str).ne(FEATURE_COLUMNS.iter().copied()) {
            return Err(ModelError::Load(format!(
                "feature_names {:?} do not match {:?}",
                model.feature_names, FEATURE_COLUMNS
            )));
        }

        let coefficients: [f64; FEATURE_COUNT] = model.coefficients.as_slice().try_into().map_err(|_| {
            ModelError::Load(format!(
                "expected {} coefficients, found {}",
                FEATURE_COUNT,
                model.coefficients.len()
            ))
        })?;

        if !(model.threshold > 0.0 && model.threshold < 1.0) {
            return Err(ModelError::Load(format!(
                "threshold {} outside (0, 1)",
                model.threshold
            )));
        }

        Ok(Self {
            coefficients,
            intercept: model.intercept,
            threshold: model.threshold,
            name: "logistic".to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: LogisticModel =
            serde_json::from_str(json).map_err(|e| ModelError::Load(e.to_string()))?;
        Self::new(model)
    }

    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        tracing::info!("Loading logistic model from: {}", path.display());

        let json = std::fs::read_to_string(path).map_err(|e| ModelError::Load(e.to_string()))?;
        let mut classifier = Self::from_json(&json)?;
        classifier.name = format!("logistic:{}", path.display());
        Ok(classifier)
    }

    fn positive_probability(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        1.0 / (1.0 + (-z).exp())
    }
}

impl Classifier for LogisticClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<u8>, ModelError> {
        Ok(frame
            .rows()
            .iter()
            .map(|r| u8::from(self.positive_probability(&r.features()) >= self.threshold))
            .collect())
    }

    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<[f64; 2]>, ModelError> {
        Ok(frame
            .rows()
            .iter()
            .map(|r| {
                let p = self.positive_probability(&r.features());
                [1.0 - p, p]
            })
            .collect())
    }
}
