//! Error handling
//!
//! Every failure a request can hit falls into one of three kinds, each
//! rendered as `{"status": "error", "error_type": ..., "message": ...}`.

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::inference::ModelError;
use crate::validation::ValidationError;

pub type AppResult<T> = Result<T, AppError>;

/// Message returned for every internal error; details stay in the logs
pub const INTERNAL_ERROR_MESSAGE: &str = "Unexpected server error";

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or empty upload
    #[error("{0}")]
    InputError(String),

    /// Input does not match the model schema
    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    /// Anything unanticipated
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InputError(_) => "input_error",
            AppError::ValidationError(_) => "validation_error",
            AppError::InternalError(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InputError(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::InputError(msg) => {
                tracing::debug!("Input error: {}", msg);
                msg.clone()
            }
            AppError::ValidationError(err) => {
                tracing::debug!("Validation error: {}", err);
                err.to_string()
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        let body = Json(json!({
            "status": "error",
            "error_type": self.error_type(),
            "message": message
        }));

        (self.status_code(), body).into_response()
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ValidationError(err.into())
    }
}
