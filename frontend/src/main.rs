//! Engine Maintenance Predictor - Operator Web UI
//!
//! Collects engine sensor readings (form or CSV upload), forwards them to
//! the prediction API and renders the outcome.

mod api;
mod logic;
pub mod constants;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use api::AppState;
use logic::backend::{BackendClient, BackendConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting {} UI v{}...", constants::APP_NAME, constants::APP_VERSION);

    let client = match BackendClient::new(BackendConfig::default()) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create backend client: {}", e);
            return;
        }
    };
    log::info!("Prediction backend: {}", client.server_url());

    let app = create_router(AppState {
        client: Arc::new(client),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], constants::get_port()));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    log::info!("🚀 UI listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
    }
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::pages::index))
        .route("/predict", post(api::pages::predict))
        .route("/predict-batch", post(api::pages::predict_batch))
        .layer(DefaultBodyLimit::max(constants::get_max_upload_bytes()))
        .with_state(state)
}
