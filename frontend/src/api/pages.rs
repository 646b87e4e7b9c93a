//! Page Handlers
//!
//! Each request renders the whole page; nothing is kept between requests.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Html,
    Form,
};

use crate::logic::backend::BackendClient;
use crate::logic::batch::{self, CsvTable};
use crate::logic::form::{self, FormValues};
use crate::logic::render::{self, BatchView, SingleView};

/// Shared UI state
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<BackendClient>,
}

/// Empty form with default values
pub async fn index() -> Html<String> {
    Html(render::page(&form::default_values(), &SingleView::Empty, &BatchView::Empty))
}

/// Single-record prediction from the engine parameter form
pub async fn predict(
    State(state): State<AppState>,
    Form(values): Form<FormValues>,
) -> Html<String> {
    let view = match form::parse_record(&values) {
        Err(message) => SingleView::Error(message),
        Ok(record) => match state.client.predict(&record).await {
            Ok(prediction) => {
                log::info!(
                    "Prediction: class={} probability={:.4}",
                    prediction.prediction,
                    prediction.probability
                );
                SingleView::Result(prediction)
            }
            Err(e) => {
                log::warn!("Single prediction failed: {}", e);
                SingleView::Error(e.to_string())
            }
        },
    };

    Html(render::page(&values, &view, &BatchView::Empty))
}

/// Batch prediction from an uploaded CSV file
pub async fn predict_batch(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Html<String> {
    let view = match multipart {
        Ok(mut multipart) => match read_upload(&mut multipart).await {
            Ok(Some((file_name, data))) => batch_view(&state.client, &file_name, data).await,
            Ok(None) => BatchView::Error("Please select a CSV file to upload".to_string()),
            Err(message) => BatchView::Error(message),
        },
        Err(rejection) => BatchView::Error(rejection.body_text()),
    };

    Html(render::page(&form::default_values(), &SingleView::Empty, &view))
}

async fn batch_view(client: &BackendClient, file_name: &str, data: Vec<u8>) -> BatchView {
    let prediction = match client.predict_batch(file_name, data.clone()).await {
        Ok(prediction) => prediction,
        Err(e) => {
            log::warn!("Batch prediction for '{}' failed: {}", file_name, e);
            return BatchView::Error(e.to_string());
        }
    };

    let table = match CsvTable::parse(&data) {
        Ok(table) => table,
        Err(e) => return BatchView::Error(format!("Could not read uploaded file: {}", e)),
    };

    match batch::merge_predictions(table, &prediction) {
        Ok(table) => {
            log::info!("Batch prediction for '{}': {} records", file_name, prediction.total_records);
            BatchView::Table(table)
        }
        Err(message) => BatchView::Error(message.to_string()),
    }
}

/// The uploaded `file` field, if one with a filename was submitted
async fn read_upload(multipart: &mut Multipart) -> Result<Option<(String, Vec<u8>)>, String> {
    while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Ok(None);
        }

        let data = field.bytes().await.map_err(|e| e.body_text())?;
        return Ok(Some((file_name, data.to_vec())));
    }

    Ok(None)
}
