//! Backend API Client
//!
//! Posts sensor readings to the prediction API and turns each response into
//! either a typed prediction or a `BackendError` ready to show the operator.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::constants;
use crate::logic::form::SensorRecord;

/// Backend connection configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub server_url: String,
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            server_url: constants::get_backend_url(),
            timeout_seconds: constants::get_request_timeout(),
        }
    }
}

/// Backend API client
pub struct BackendClient {
    config: BackendConfig,
    http_client: reqwest::Client,
}

// Response types

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SinglePrediction {
    pub prediction: u8,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchPrediction {
    pub total_records: usize,
    pub predictions: Vec<u8>,
    pub probabilities: Vec<f64>,
}

impl BackendClient {
    /// Create new backend client
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    pub fn server_url(&self) -> &str {
        &self.config.server_url
    }

    /// Predict for a single record
    pub async fn predict(&self, record: &SensorRecord) -> Result<SinglePrediction, BackendError> {
        let url = format!("{}{}", self.config.server_url, constants::SINGLE_ENDPOINT);

        log::debug!("Requesting single prediction from {}", url);

        let response = self.http_client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        read_response(response).await
    }

    /// Forward an uploaded CSV file for batch prediction
    pub async fn predict_batch(&self, file_name: &str, data: Vec<u8>) -> Result<BatchPrediction, BackendError> {
        let url = format!("{}{}", self.config.server_url, constants::BATCH_ENDPOINT);

        log::info!("Requesting batch prediction for '{}' ({} bytes)", file_name, data.len());

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self.http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::NetworkError(e.to_string()))?;

        read_response(response).await
    }
}

async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(|e| BackendError::NetworkError(e.to_string()))?;

    interpret_response(status, &body)
}

/// Branch on status code the way the operator sees it:
/// 200 carries a success or error envelope, 400/500 carry a structured error,
/// anything else only has its status code to report.
pub fn interpret_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, BackendError> {
    match status {
        200 => {
            let envelope: Value = serde_json::from_slice(body)
                .map_err(|e| BackendError::ParseError(e.to_string()))?;

            if envelope.get("status").and_then(Value::as_str) == Some("success") {
                serde_json::from_value(envelope).map_err(|e| BackendError::ParseError(e.to_string()))
            } else {
                Err(BackendError::Rejected(error_message(&envelope)))
            }
        }
        400 | 500 => {
            let envelope: Value = serde_json::from_slice(body)
                .map_err(|e| BackendError::ParseError(e.to_string()))?;

            Err(BackendError::ApiError {
                status,
                message: error_message(&envelope),
            })
        }
        other => Err(BackendError::ServerError(other)),
    }
}

fn error_message(envelope: &Value) -> String {
    envelope
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
        .to_string()
}

/// Backend client errors. `Display` is the text shown to the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    NetworkError(String),
    /// 200 response with an error envelope
    Rejected(String),
    /// 400 or 500 with a structured error body
    ApiError { status: u16, message: String },
    /// Any other status code
    ServerError(u16),
    ParseError(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError(e) => write!(f, "Network error: {}", e),
            Self::Rejected(message) => write!(f, "{}", message),
            Self::ApiError { status, message } => write!(
                f,
                "Error processing request- Status Code : {}, error : {}",
                status, message
            ),
            Self::ServerError(code) => write!(f, "Error processing request- Status Code : {}", code),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for BackendError {}
