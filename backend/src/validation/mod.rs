//! Input validation
//!
//! Turns a `RawTable` (one JSON record or an uploaded CSV) into a
//! `FeatureFrame` the classifier can consume:
//!
//! 1. normalize column names (whitespace runs become `_`)
//! 2. drop the label column if present
//! 3. check the column set against `FEATURE_COLUMNS`
//! 4. reject empty input
//! 5. coerce every cell to a finite `f64`
//!
//! Physical ranges are not checked; out-of-range readings pass through.


use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{FeatureFrame, RawTable, RawValue, SensorRecord, FEATURE_COLUMNS, FEATURE_COUNT, LABEL_COLUMN};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object of sensor readings")]
    NotAnObject,

    #[error("Input contains no rows")]
    Empty,

    #[error("Duplicate field after name normalization: {0}")]
    DuplicateField(String),

    #[error("{}", describe_mismatch(.missing, .unexpected))]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Row {row}, field '{field}': expected a finite number, got {found}")]
    InvalidValue {
        row: usize,
        field: String,
        found: String,
    },

    #[error("Malformed CSV: {0}")]
    MalformedCsv(String),
}

impl From<csv::Error> for ValidationError {
    fn from(err: csv::Error) -> Self {
        ValidationError::MalformedCsv(err.to_string())
    }
}

fn describe_mismatch(missing: &[String], unexpected: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("Missing required fields: {}", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        parts.push(format!("Unexpected fields: {}", unexpected.join(", ")));
    }
    parts.join("; ")
}

/// Canonical column name: trimmed, whitespace runs collapsed to `_`
pub fn normalize_column_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Validate raw input and reshape it into schema order
pub fn validate_and_prepare(table: RawTable) -> Result<FeatureFrame, ValidationError> {
    let label = normalize_column_name(LABEL_COLUMN);

    // normalized name -> source column index
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(table.columns.len());
    let mut unexpected = Vec::new();
    let expected: HashSet<&str> = FEATURE_COLUMNS.iter().copied().collect();

    for (idx, column) in table.columns.iter().enumerate() {
        let name = normalize_column_name(column);
        if name == label {
            continue;
        }
        if positions.contains_key(&name) {
            return Err(ValidationError::DuplicateField(name));
        }
        if !expected.contains(name.as_str()) {
            unexpected.push(name.clone());
        }
        positions.insert(name, idx);
    }

    let missing: Vec<String> = FEATURE_COLUMNS
        .iter()
        .filter(|c| !positions.contains_key(**c))
        .map(|c| c.to_string())
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(ValidationError::SchemaMismatch { missing, unexpected });
    }

    if table.is_empty() {
        return Err(ValidationError::Empty);
    }

    let order: Vec<usize> = FEATURE_COLUMNS.iter().map(|c| positions[*c]).collect();

    let mut rows = Vec::with_capacity(table.row_count());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let mut values = [0.0f64; FEATURE_COUNT];
        for (slot, (&src, field)) in order.iter().zip(FEATURE_COLUMNS.iter()).enumerate() {
            let cell = row.get(src).unwrap_or(&RawValue::Missing);
            values[slot] = coerce(cell).ok_or_else(|| ValidationError::InvalidValue {
                row: row_idx + 1,
                field: field.to_string(),
                found: cell.describe(),
            })?;
        }
        rows.push(SensorRecord::from_features(values));
    }

    Ok(FeatureFrame::new(rows))
}

/// Integers widen to float; anything non-numeric or non-finite is rejected
fn coerce(cell: &RawValue) -> Option<f64> {
    let value = match cell {
        RawValue::Int(i) => *i as f64,
        RawValue::Float(f) => *f,
        _ => return None,
    };
    value.is_finite().then_some(value)
}
