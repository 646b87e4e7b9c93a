use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tower::ServiceExt;

use super::AppState;
use crate::constants::{BATCH_ENDPOINT, SINGLE_ENDPOINT};
use crate::create_router;
use crate::logic::backend::{BackendClient, BackendConfig};

const BOUNDARY: &str = "engine-ui-boundary";

const TWO_ROWS: &str = "Engine rpm,Lub oil pressure,Fuel pressure,Coolant pressure,lub oil temp,Coolant temp\n\
                        700,2.49,11.79,3.17,84.14,81.63\n\
                        876,2.94,16.19,2.46,77.64,82.44\n";

/// Serve `backend` on an ephemeral port and return its base URL
async fn spawn_backend(backend: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend).await.unwrap();
    });
    format!("http://{}", addr)
}

fn healthy_backend() -> Router {
    Router::new()
        .route(
            SINGLE_ENDPOINT,
            post(|| async { Json(json!({"status": "success", "prediction": 1, "probability": 0.9123})) }),
        )
        .route(
            BATCH_ENDPOINT,
            post(|| async {
                Json(json!({
                    "status": "success",
                    "total_records": 2,
                    "predictions": [1, 0],
                    "probabilities": [0.91, 0.08]
                }))
            }),
        )
}

fn failing_backend() -> Router {
    Router::new()
        .route(
            SINGLE_ENDPOINT,
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "status": "error",
                        "error_type": "validation_error",
                        "message": "Missing required fields: Fuel_pressure"
                    })),
                )
            }),
        )
        .route(
            BATCH_ENDPOINT,
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        )
}

fn ui(server_url: String) -> Router {
    let client = BackendClient::new(BackendConfig {
        server_url,
        timeout_seconds: 5,
    })
    .unwrap();

    create_router(AppState {
        client: Arc::new(client),
    })
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn upload_request(file_name: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
         Content-Type: text/csv\r\n\r\n{c}\r\n--{b}--\r\n",
        b = BOUNDARY,
        f = file_name,
        c = content,
    );

    Request::builder()
        .method("POST")
        .uri("/predict-batch")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn render(app: Router, request: Request<Body>) -> String {
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const FORM_BODY: &str = "Engine_rpm=735&Lub_oil_pressure=3.3&Fuel_pressure=6.5\
                         &Coolant_pressure=2.25&lub_oil_temp=75&Coolant_temp=75";

#[tokio::test]
async fn test_index_shows_form_defaults() {
    let html = render(
        ui("http://127.0.0.1:1".to_string()),
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;

    assert!(html.contains("Engine Parameters"));
    assert!(html.contains("name=\"Coolant_pressure\" value=\"2.250000\""));
}

#[tokio::test]
async fn test_single_prediction_rendered() {
    let url = spawn_backend(healthy_backend()).await;
    let html = render(ui(url), form_request(FORM_BODY)).await;

    assert!(html.contains("Engine needs maintenance"));
    assert!(html.contains("91.23%"));
    // The submitted values are kept in the form
    assert!(html.contains("name=\"Engine_rpm\" value=\"735\""));
}

#[tokio::test]
async fn test_single_validation_error_surfaced() {
    let url = spawn_backend(failing_backend()).await;
    let html = render(ui(url), form_request(FORM_BODY)).await;

    assert!(html.contains(
        "Error processing request- Status Code : 400, error : Missing required fields: Fuel_pressure"
    ));
}

#[tokio::test]
async fn test_invalid_form_value_not_sent() {
    // No backend is listening; the form error must be reported first
    let html = render(
        ui("http://127.0.0.1:1".to_string()),
        form_request("Engine_rpm=fast&Lub_oil_pressure=3.3&Fuel_pressure=6.5&Coolant_pressure=2.25&lub_oil_temp=75&Coolant_temp=75"),
    )
    .await;

    assert!(html.contains("Please enter a number for: Engine RPM"));
    assert!(!html.contains("Network error"));
}

#[tokio::test]
async fn test_unreachable_backend_reports_network_error() {
    let html = render(ui("http://127.0.0.1:1".to_string()), form_request(FORM_BODY)).await;
    assert!(html.contains("Network error"));
}

#[tokio::test]
async fn test_batch_table_rendered_with_predictions() {
    let url = spawn_backend(healthy_backend()).await;
    let html = render(ui(url), upload_request("engines.csv", TWO_ROWS)).await;

    assert!(html.contains("Batch prediction completed successfully"));
    assert!(html.contains("<th>Prediction</th><th>Probability</th>"));
    assert!(html.contains("<td>81.63</td><td>1</td><td>0.91</td>"));
    assert!(html.contains("<td>82.44</td><td>0</td><td>0.08</td>"));
}

#[tokio::test]
async fn test_batch_row_count_mismatch_reported() {
    let url = spawn_backend(healthy_backend()).await;
    let three_rows = format!("{}520,2.96,6.55,1.06,77.75,79.65\n", TWO_ROWS);
    let html = render(ui(url), upload_request("engines.csv", &three_rows)).await;

    assert!(html.contains("Prediction count does not match input records"));
    assert!(!html.contains("<table>"));
}

#[tokio::test]
async fn test_batch_unexpected_status_reports_code() {
    let url = spawn_backend(failing_backend()).await;
    let html = render(ui(url), upload_request("engines.csv", TWO_ROWS)).await;

    assert!(html.contains("Error processing request- Status Code : 503"));
}

#[tokio::test]
async fn test_batch_without_file_asks_for_one() {
    let html = render(ui("http://127.0.0.1:1".to_string()), upload_request("", "")).await;
    assert!(html.contains("Please select a CSV file to upload"));
}
