//! Sensor record model and the classifier's input schema

use serde::Serialize;

/// Number of features the classifier consumes
pub const FEATURE_COUNT: usize = 6;

/// Feature columns in the exact order the classifier expects
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "Engine_rpm",
    "Lub_oil_pressure",
    "Fuel_pressure",
    "Coolant_pressure",
    "lub_oil_temp",
    "Coolant_temp",
];

/// Outcome column present in the training data, never fed to the model
pub const LABEL_COLUMN: &str = "Engine Condition";

/// One row of engine sensor readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorRecord {
    #[serde(rename = "Engine_rpm")]
    pub engine_rpm: f64,
    #[serde(rename = "Lub_oil_pressure")]
    pub lub_oil_pressure: f64,
    #[serde(rename = "Fuel_pressure")]
    pub fuel_pressure: f64,
    #[serde(rename = "Coolant_pressure")]
    pub coolant_pressure: f64,
    #[serde(rename = "lub_oil_temp")]
    pub lub_oil_temp: f64,
    #[serde(rename = "Coolant_temp")]
    pub coolant_temp: f64,
}

impl SensorRecord {
    /// Build from values ordered as `FEATURE_COLUMNS`
    pub fn from_features(values: [f64; FEATURE_COUNT]) -> Self {
        let [engine_rpm, lub_oil_pressure, fuel_pressure, coolant_pressure, lub_oil_temp, coolant_temp] =
            values;
        Self {
            engine_rpm,
            lub_oil_pressure,
            fuel_pressure,
            coolant_pressure,
            lub_oil_temp,
            coolant_temp,
        }
    }

    /// Values ordered as `FEATURE_COLUMNS`
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.engine_rpm,
            self.lub_oil_pressure,
            self.fuel_pressure,
            self.coolant_pressure,
            self.lub_oil_temp,
            self.coolant_temp,
        ]
    }
}

/// Validated model input: at least one row, columns in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    rows: Vec<SensorRecord>,
}

impl FeatureFrame {
    /// Outside tests, frames come from `validation::validate_and_prepare`
    pub(crate) fn new(rows: Vec<SensorRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SensorRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row-major `f32` buffer, the layout ONNX tensors are built from
    pub fn to_f32_row_major(&self) -> Vec<f32> {
        self.rows
            .iter()
            .flat_map(|r| r.features())
            .map(|v| v as f32)
            .collect()
    }
}
