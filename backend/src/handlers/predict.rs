//! Prediction handlers

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde_json::{Map, Value};

use crate::models::{BatchPredictionResponse, PredictionResponse, RawTable};
use crate::validation::ValidationError;
use crate::{AppError, AppResult, AppState};

/// Multipart field carrying the CSV upload
pub const FILE_FIELD: &str = "file";

/// Predict maintenance need for a single sensor record
pub async fn predict_single(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<PredictionResponse>> {
    let record = parse_record(&body)?;
    let result = state.service.predict_record(&record)?;

    tracing::debug!(
        "Single prediction: class={} probability={:.4}",
        result.predicted_class,
        result.failure_probability
    );

    Ok(Json(result.into()))
}

/// Predict maintenance need for every row of an uploaded CSV file
pub async fn predict_batch(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<BatchPredictionResponse>> {
    // A request that is not multipart at all carries no file either
    let mut multipart = multipart.map_err(|_| AppError::InputError("File not provided".to_string()))?;

    let upload = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| AppError::InputError("File not provided".to_string()))?;

    if upload.file_name.trim().is_empty() {
        return Err(AppError::InputError("No file selected".to_string()));
    }

    let table = RawTable::from_csv(&upload.data)?;
    if table.is_empty() {
        return Err(AppError::InputError("Uploaded file is empty".to_string()));
    }

    tracing::info!(
        "Batch upload '{}': {} rows, {} columns",
        upload.file_name,
        table.row_count(),
        table.columns.len()
    );

    let batch = state.service.predict_table(table)?;

    Ok(Json(batch.into()))
}

fn parse_record(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(record)) => Ok(record),
        _ => Err(ValidationError::NotAnObject),
    }
}

struct Upload {
    file_name: String,
    data: Bytes,
}

/// First `file` field of the form; other fields are skipped
async fn read_upload(multipart: &mut Multipart) -> AppResult<Option<Upload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InputError(format!("Invalid upload: {}", e.body_text())))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InputError(format!("Invalid upload: {}", e.body_text())))?;

        return Ok(Some(Upload { file_name, data }));
    }

    Ok(None)
}
