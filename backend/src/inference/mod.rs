//! Inference - the trained classifier behind a small trait
//!
//! The classifier is loaded once at startup and shared read-only between
//! requests. Two artifact formats are supported, chosen by file extension:
//!
//! - `.onnx`: ONNX Runtime session (e.g. XGBoost exported via onnxmltools)
//! - `.json`: logistic regression coefficients

pub mod onnx;
pub mod logistic;


use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::models::FeatureFrame;

pub use logistic::LogisticClassifier;
pub use onnx::OnnxClassifier;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to load model: {0}")]
    Load(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid model output: {0}")]
    Output(String),
}

/// Opaque binary classifier. Row `i` of every output belongs to row `i` of
/// the input frame.
pub trait Classifier: Send + Sync {
    /// Human-readable model description for health reporting
    fn name(&self) -> &str;

    /// Predicted class (0 or 1) per row
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<u8>, ModelError>;

    /// `[P(class 0), P(class 1)]` per row
    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<[f64; 2]>, ModelError>;

    /// Classes and probabilities together. Backends that produce both from a
    /// single pass override this.
    fn classify(&self, frame: &FeatureFrame) -> Result<(Vec<u8>, Vec<[f64; 2]>), ModelError> {
        Ok((self.predict(frame)?, self.predict_proba(frame)?))
    }
}

/// Load a classifier artifact, picking the implementation by extension
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, ModelError> {
    if !path.exists() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "onnx" => Ok(Arc::new(OnnxClassifier::load(path)?)),
        "json" => Ok(Arc::new(LogisticClassifier::from_path(path)?)),
        other => Err(ModelError::UnsupportedFormat(format!(
            "'{}' (expected .onnx or .json)",
            other
        ))),
    }
}

/// Map a raw class label onto {0, 1}
pub(crate) fn class_label(raw: i64) -> Result<u8, ModelError> {
    match raw {
        0 => Ok(0),
        1 => Ok(1),
        other => Err(ModelError::Output(format!("class label {} is not binary", other))),
    }
}
