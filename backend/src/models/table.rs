//! Untyped tabular input, as received before validation

use serde_json::{Map, Value};

/// A single cell as it arrived on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Missing,
}

impl RawValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Missing,
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Int(i),
                None => n.as_f64().map(RawValue::Float).unwrap_or(RawValue::Missing),
            },
            Value::String(s) => RawValue::Text(s.clone()),
            other => RawValue::Text(other.to_string()),
        }
    }

    /// Infer the type of a CSV cell: integer, then float, otherwise text.
    pub fn from_cell(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return RawValue::Missing;
        }
        if let Ok(i) = cell.parse::<i64>() {
            return RawValue::Int(i);
        }
        if let Ok(f) = cell.parse::<f64>() {
            return RawValue::Float(f);
        }
        RawValue::Text(cell.to_string())
    }

    /// Short description used in validation messages
    pub fn describe(&self) -> String {
        match self {
            RawValue::Int(i) => format!("integer {}", i),
            RawValue::Float(f) => format!("number {}", f),
            RawValue::Text(s) => format!("text '{}'", s),
            RawValue::Bool(b) => format!("boolean {}", b),
            RawValue::Missing => "missing value".to_string(),
        }
    }
}

/// Named columns plus rows of raw cells. Every row has one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    /// A JSON object becomes a one-row table
    pub fn from_json_record(record: &Map<String, Value>) -> Self {
        let columns = record.keys().cloned().collect();
        let row = record.values().map(RawValue::from_json).collect();
        Self {
            columns,
            rows: vec![row],
        }
    }

    /// Parse CSV bytes with a header row. Rows with a different width than
    /// the header are rejected by the reader.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let columns = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(RawValue::from_cell).collect());
        }

        Ok(Self { columns, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
