//! Resource API Tests
//!
//! Drives the assembled router request by request: envelopes, validation,
//! CORS preflight, the 404 fallback, append mode, and mirror injection.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use csvboard::config::{Config, ResourceConfig, WriteMode};
use csvboard::http_server::HttpServer;
use csvboard::mirror::{MirrorError, MirrorResult, MirrorSink, NullSink};

// =============================================================================
// Test Utilities
// =============================================================================

fn test_config(data_dir: &Path) -> Config {
    Config {
        data_dir: data_dir.to_path_buf(),
        resources: vec![
            ResourceConfig {
                name: "documents".to_string(),
                file: "DocumentTracker.csv".to_string(),
                prefix: None,
                mode: WriteMode::Replace,
                seed: Vec::new(),
            },
            ResourceConfig {
                name: "savings".to_string(),
                file: "savings_data.csv".to_string(),
                prefix: Some("chart".to_string()),
                mode: WriteMode::Replace,
                seed: Vec::new(),
            },
            ResourceConfig {
                name: "tasks".to_string(),
                file: "tasks.csv".to_string(),
                prefix: Some("tasks".to_string()),
                mode: WriteMode::Append,
                seed: Vec::new(),
            },
        ],
        ..Config::default()
    }
}

fn router_for(config: Config) -> Router {
    HttpServer::with_mirror(config, Arc::new(NullSink)).router()
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_raw(app: &Router, path: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, path, &body.to_string()).await
}

// =============================================================================
// Read path
// =============================================================================

#[tokio::test]
async fn test_read_missing_file_returns_empty_data() {
    let temp = TempDir::new().unwrap();
    let app = router_for(test_config(temp.path()));

    let (status, body) = get_json(&app, "/api/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": []}));
}

#[tokio::test]
async fn test_read_existing_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("savings_data.csv"),
        "Month,Value\nJan,1000\nFeb,1200",
    )
    .unwrap();
    let app = router_for(test_config(temp.path()));

    let (status, body) = get_json(&app, "/api/chart/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(
        body["data"],
        json!([
            {"Month": "Jan", "Value": "1000"},
            {"Month": "Feb", "Value": "1200"}
        ])
    );
}

// =============================================================================
// Write path
// =============================================================================

#[tokio::test]
async fn test_save_then_read_round_trip() {
    let temp = TempDir::new().unwrap();
    let app = router_for(test_config(temp.path()));

    let (status, body) = post_json(
        &app,
        "/api/save",
        json!({"data": [{"Name": "Ann", "Age": "30"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Data saved successfully"));

    let (status, body) = get_json(&app, "/api/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "data": [{"Name": "Ann", "Age": "30"}]})
    );
}

#[tokio::test]
async fn test_save_infers_header_from_first_record() {
    let temp = TempDir::new().unwrap();
    let app = router_for(test_config(temp.path()));

    post_json(
        &app,
        "/api/save",
        json!({"data": [{"A": "1", "B": "2"}, {"A": "3", "B": "4"}]}),
    )
    .await;

    let content = fs::read_to_string(temp.path().join("DocumentTracker.csv")).unwrap();
    assert_eq!(content, "A,B\n1,2\n3,4");
}

#[tokio::test]
async fn test_save_coerces_numeric_cells() {
    let temp = TempDir::new().unwrap();
    let app = router_for(test_config(temp.path()));

    post_json(
        &app,
        "/api/save",
        json!({"data": [{"Description": "Rent", "Cost": 800}]}),
    )
    .await;

    let content = fs::read_to_string(temp.path().join("DocumentTracker.csv")).unwrap();
    assert_eq!(content, "Description,Cost\nRent,800");
}

#[tokio::test]
async fn test_save_empty_array_truncates() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("DocumentTracker.csv");
    fs::write(&file, "A,B\n1,2").unwrap();
    let app = router_for(test_config(temp.path()));

    let (status, body) = post_json(&app, "/api/save", json!({"data": []})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(fs::read_to_string(&file).unwrap(), "");
}

#[tokio::test]
async fn test_append_mode_accumulates_rows() {
    let temp = TempDir::new().unwrap();
    let app = router_for(test_config(temp.path()));

    post_json(
        &app,
        "/api/tasks/save",
        json!({"data": [{"Task": "one", "Done": "no"}]}),
    )
    .await;
    post_json(
        &app,
        "/api/tasks/save",
        json!({"data": [{"Task": "two", "Done": "yes"}]}),
    )
    .await;

    let (_, body) = get_json(&app, "/api/tasks/data").await;
    assert_eq!(
        body["data"],
        json!([
            {"Task": "one", "Done": "no"},
            {"Task": "two", "Done": "yes"}
        ])
    );
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_non_array_data_rejected_and_file_untouched() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("DocumentTracker.csv");
    fs::write(&file, "A,B\n1,2").unwrap();
    let app = router_for(test_config(temp.path()));

    let (status, body) =
        post_json(&app, "/api/save", json!({"data": "not-an-array"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Data must be an array"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "A,B\n1,2");
}

#[tokio::test]
async fn test_missing_data_field_rejected() {
    let temp = TempDir::new().unwrap();
    let app = router_for(test_config(temp.path()));

    let (status, body) = post_json(&app, "/api/save", json!({"rows": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_malformed_json_body_rejected() {
    let temp = TempDir::new().unwrap();
    let app = router_for(test_config(temp.path()));

    let (status, body) = post_raw(&app, "/api/save", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

// =============================================================================
// Routing and CORS
// =============================================================================

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let temp = TempDir::new().unwrap();
    let app = router_for(test_config(temp.path()));

    let (status, body) = get_json(&app, "/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "Not found"}));
}

#[tokio::test]
async fn test_options_preflight_allowed() {
    let temp = TempDir::new().unwrap();
    let app = router_for(test_config(temp.path()));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/save")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_health_reports_ok() {
    let temp = TempDir::new().unwrap();
    let app = router_for(test_config(temp.path()));

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}

// =============================================================================
// Mirror Sink
// =============================================================================

#[derive(Debug, Default)]
struct RecordingSink {
    calls: Mutex<Vec<(PathBuf, String)>>,
}

impl MirrorSink for RecordingSink {
    fn publish(&self, path: &Path, message: &str) -> MirrorResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), message.to_string()));
        Ok(())
    }
}

#[derive(Debug)]
struct FailingSink;

impl MirrorSink for FailingSink {
    fn publish(&self, _path: &Path, _message: &str) -> MirrorResult<()> {
        Err(MirrorError::Publish("remote unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_mirror_notified_after_save() {
    let temp = TempDir::new().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let app = HttpServer::with_mirror(test_config(temp.path()), sink.clone()).router();

    post_json(
        &app,
        "/api/chart/save",
        json!({"data": [{"Month": "Jan", "Value": "1000"}]}),
    )
    .await;

    let calls = sink.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, temp.path().join("savings_data.csv"));
    assert_eq!(calls[0].1, "Update savings_data.csv via server");
}

#[tokio::test]
async fn test_mirror_not_notified_on_validation_failure() {
    let temp = TempDir::new().unwrap();
    let sink = Arc::new(RecordingSink::default());
    let app = HttpServer::with_mirror(test_config(temp.path()), sink.clone()).router();

    post_json(&app, "/api/save", json!({"data": "nope"})).await;

    assert!(sink.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failing_mirror_does_not_fail_save() {
    let temp = TempDir::new().unwrap();
    let app = HttpServer::with_mirror(test_config(temp.path()), Arc::new(FailingSink)).router();

    let (status, body) = post_json(
        &app,
        "/api/save",
        json!({"data": [{"Name": "Ann"}]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    // The write itself landed despite the sink failure.
    let content = fs::read_to_string(temp.path().join("DocumentTracker.csv")).unwrap();
    assert_eq!(content, "Name\nAnn");
}
