//! ONNX Runtime classifier
//!
//! Expects a two-output graph: first output is the class label (int64,
//! `[N]`), second is the class probabilities (float32, `[N, 2]`). This is
//! what onnxmltools produces for an XGBoost classifier with zipmap disabled.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;

use super::{class_label, Classifier, ModelError};
use crate::models::{FeatureFrame, FEATURE_COUNT};

pub struct OnnxClassifier {
    // `Session::run` needs `&mut`, so requests take turns on the session
    session: Mutex<Session>,
    name: String,
    label_output: String,
    proba_output: String,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        tracing::info!("Loading ONNX model from: {}", path.display());

        let session = Session::builder()
            .map_err(|e| ModelError::Load(format!("session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Load(format!("optimization level: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| ModelError::Load(e.to_string()))?;

        let outputs: Vec<String> = session.outputs().iter().map(|o| o.name().to_string()).collect();
        let [label_output, proba_output] = match outputs.as_slice() {
            [label, proba, ..] => [label.clone(), proba.clone()],
            _ => {
                return Err(ModelError::Load(format!(
                    "expected label and probability outputs, found {:?}",
                    outputs
                )))
            }
        };

        tracing::info!(
            "ONNX model loaded (outputs: {}, {})",
            label_output,
            proba_output
        );

        Ok(Self {
            session: Mutex::new(session),
            name: format!("onnx:{}", path.display()),
            label_output,
            proba_output,
        })
    }

    pub(super) fn input_tensor(frame: &FeatureFrame) -> Result<Tensor<f32>, ModelError> {
        if frame.is_empty() {
            return Err(ModelError::Inference("empty input frame".to_string()));
        }

        let input = Array2::<f32>::from_shape_vec((frame.len(), FEATURE_COUNT), frame.to_f32_row_major())
            .map_err(|e| ModelError::Inference(format!("input shape: {}", e)))?;

        Tensor::from_array(input)
            .map_err(|e| ModelError::Inference(format!("input tensor: {}", e)))
    }

    /// One session run yielding both the labels and the probability rows
    fn run(&self, frame: &FeatureFrame) -> Result<(Vec<u8>, Vec<[f64; 2]>), ModelError> {
        let input = Self::input_tensor(frame)?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let labels = outputs
            .get(self.label_output.as_str())
            .ok_or_else(|| ModelError::Output(format!("missing output '{}'", self.label_output)))?
            .try_extract_tensor::<i64>()
            .map_err(|e| ModelError::Output(e.to_string()))?
            .1;
        let classes = labels.iter().map(|&raw| class_label(raw)).collect::<Result<Vec<_>, _>>()?;

        let probabilities = outputs
            .get(self.proba_output.as_str())
            .ok_or_else(|| ModelError::Output(format!("missing output '{}'", self.proba_output)))?
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Output(e.to_string()))?
            .1;
        let rows = probability_rows(probabilities)?;

        Ok((classes, rows))
    }
}

/// Split a flat `[N, 2]` probability tensor into per-row pairs
pub(super) fn probability_rows(values: &[f32]) -> Result<Vec<[f64; 2]>, ModelError> {
    if values.len() % 2 != 0 {
        return Err(ModelError::Output(format!(
            "probability tensor has {} values, expected two per row",
            values.len()
        )));
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| [f64::from(pair[0]), f64::from(pair[1])])
        .collect())
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<u8>, ModelError> {
        self.run(frame).map(|(classes, _)| classes)
    }

    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<[f64; 2]>, ModelError> {
        self.run(frame).map(|(_, rows)| rows)
    }

    fn classify(&self, frame: &FeatureFrame) -> Result<(Vec<u8>, Vec<[f64; 2]>), ModelError> {
        self.run(frame)
    }
}
