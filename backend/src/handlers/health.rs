//! Welcome, health check and schema handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::models::{FEATURE_COLUMNS, LABEL_COLUMN};
use crate::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the Engine Maintenance Prediction!";

pub async fn home() -> &'static str {
    WELCOME_MESSAGE
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model: String,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model: state.service.model_name().to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[derive(Serialize)]
pub struct SchemaResponse {
    features: &'static [&'static str],
    label_column: &'static str,
}

/// Columns the classifier expects, in order
pub async fn schema() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        features: &FEATURE_COLUMNS,
        label_column: LABEL_COLUMN,
    })
}
