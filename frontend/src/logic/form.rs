//! Engine parameter form
//!
//! Field definitions for the single-record form and parsing of submitted
//! values. Suggested ranges are shown as hints only; they are not enforced.

use std::collections::HashMap;

use serde::Serialize;

/// One input of the engine parameter form
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Key sent to the backend
    pub key: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub default: f64,
    /// Decimal places shown in the input
    pub precision: usize,
}

pub const ENGINE_FIELDS: [FieldSpec; 6] = [
    FieldSpec { key: "Engine_rpm", label: "Engine RPM", hint: "50 to 2500", default: 735.0, precision: 2 },
    FieldSpec { key: "Lub_oil_pressure", label: "Lubricating oil pressure in kPa", hint: "0.001 to 10.0", default: 3.3, precision: 6 },
    FieldSpec { key: "Fuel_pressure", label: "Fuel Pressure in kPa", hint: "0.01 to 25.0", default: 6.5, precision: 6 },
    FieldSpec { key: "Coolant_pressure", label: "Coolant Pressure in kPa", hint: "0.01 to 10.0", default: 2.25, precision: 6 },
    FieldSpec { key: "lub_oil_temp", label: "Lubricating oil Temperature in °C", hint: "50.0 to 100.0", default: 75.0, precision: 6 },
    FieldSpec { key: "Coolant_temp", label: "Coolant Temperature in °C", hint: "50.0 to 200.0", default: 75.0, precision: 6 },
];

/// One engine reading, serialized with the backend's field names
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

impl Default for SensorRecord {
    fn default() -> Self {
        let d = |i: usize| ENGINE_FIELDS[i].default;
        Self {
            engine_rpm: d(0),
            lub_oil_pressure: d(1),
            fuel_pressure: d(2),
            coolant_pressure: d(3),
            lub_oil_temp: d(4),
            coolant_temp: d(5),
        }
    }
}

/// Raw form values keyed by field key, kept so the form can be re-rendered
/// with what the operator typed
pub type FormValues = HashMap<String, String>;

/// Form values pre-filled with the defaults
pub fn default_values() -> FormValues {
    ENGINE_FIELDS
        .iter()
        .map(|f| (f.key.to_string(), format!("{:.*}", f.precision, f.default)))
        .collect()
}

/// Parse submitted values. Every field must hold a finite number; the error
/// lists the labels of the fields that do not.
pub fn parse_record(values: &FormValues) -> Result<SensorRecord, String> {
    let mut parsed = [0.0f64; 6];
    let mut invalid = Vec::new();

    for (slot, field) in ENGINE_FIELDS.iter().enumerate() {
        match values.get(field.key).map(|v| v.trim().parse::<f64>()) {
            Some(Ok(v)) if v.is_finite() => parsed[slot] = v,
            _ => invalid.push(field.label),
        }
    }

    if !invalid.is_empty() {
        return Err(format!("Please enter a number for: {}", invalid.join(", ")));
    }

    let [engine_rpm, lub_oil_pressure, fuel_pressure, coolant_pressure, lub_oil_temp, coolant_temp] = parsed;
    Ok(SensorRecord {
        engine_rpm,
        lub_oil_pressure,
        fuel_pressure,
        coolant_pressure,
        lub_oil_temp,
        coolant_temp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse_to_default_record() {
        let record = parse_record(&default_values()).unwrap();
        assert_eq!(record, SensorRecord::default());
        assert_eq!(record.engine_rpm, 735.0);
        assert_eq!(record.coolant_pressure, 2.25);
    }

    #[test]
    fn test_out_of_range_values_accepted() {
        let mut values = default_values();
        values.insert("Engine_rpm".to_string(), "99999".to_string());

        let record = parse_record(&values).unwrap();
        assert_eq!(record.engine_rpm, 99999.0);
    }

    #[test]
    fn test_invalid_fields_listed() {
        let mut values = default_values();
        values.insert("Fuel_pressure".to_string(), "abc".to_string());
        values.remove("Coolant_temp");

        let err = parse_record(&values).unwrap_err();
        assert!(err.contains("Fuel Pressure in kPa"));
        assert!(err.contains("Coolant Temperature"));
        assert!(!err.contains("Engine RPM"));
    }

    #[test]
    fn test_record_serializes_with_backend_keys() {
        let json = serde_json::to_value(SensorRecord::default()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 6);
        for field in ENGINE_FIELDS {
            assert_eq!(object[field.key], field.default);
        }
    }
}
