use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use digilogic::flipflop::FlipFlopKind;
use digilogic::server::{router, ApiError};
use digilogic::settings::Settings;
use digilogic::workbench::Workbench;
use digilogic::DigilogicError;
use serde_json::{json, Value};
use tower::ServiceExt;

#[test]
fn missing_file_gives_defaults() {
    let settings = Settings::load("no_such_digilogic_settings.json").expect("optional file");
    assert_eq!(settings.listen_address, "127.0.0.1:8080");
    assert_eq!(settings.max_input_length, 4096);
    assert!(!settings.group_nibbles);
    assert_eq!(settings.initial_flip_flop, FlipFlopKind::Jk);
    assert_eq!(settings.startup_script, None);
}

#[test]
fn file_values_override_defaults() {
    let path = "test_digilogic_settings.json";
    fs::write(path, r#"{ "group_nibbles": true, "max_input_length": 64, "initial_flip_flop": "T" }"#)
        .expect("write settings file");
    let loaded = Settings::load(path);
    let _ = fs::remove_file(path);
    let settings = loaded.expect("valid settings file");
    assert!(settings.group_nibbles);
    assert_eq!(settings.max_input_length, 64);
    assert_eq!(settings.log_filter, "info");

    let workbench = Workbench::new(settings);
    assert_eq!(workbench.flip_flop().kind, FlipFlopKind::T);
}

#[test]
fn malformed_file_is_a_config_error() {
    let path = "test_digilogic_bad_settings.json";
    fs::write(path, r#"{ "max_input_length": "lots" }"#).expect("write settings file");
    let loaded = Settings::load(path);
    let _ = fs::remove_file(path);
    assert!(matches!(loaded, Err(DigilogicError::Config(_))));
}

#[test]
fn api_errors_map_to_status_codes() {
    let bad_input = ApiError(DigilogicError::InvalidDigit { digit: '9', position: 0, radix: 8 }).into_response();
    assert_eq!(bad_input.status(), StatusCode::BAD_REQUEST);
    let empty = ApiError(DigilogicError::EmptyInput).into_response();
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    let io = ApiError(DigilogicError::Io("disk gone".into())).into_response();
    assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request builds");
    let response = app.oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body reads");
    // extractor rejections answer in plain text
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn app() -> Router {
    router(Arc::new(Workbench::default()))
}

#[tokio::test]
async fn convert_takes_radix_as_number_or_name() {
    let (status, body) = send(app(), "POST", "/v1/convert", Some(json!({ "digits": "42", "radix": 10 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hexadecimal"], "2A");
    assert_eq!(body["binary"], "101010");

    let (status, body) = send(app(), "POST", "/v1/convert", Some(json!({ "digits": "ff", "radix": "hex" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decimal"], "255");

    let (status, _) = send(app(), "POST", "/v1/convert", Some(json!({ "digits": "12", "radix": 3 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(app(), "POST", "/v1/convert", Some(json!({ "digits": "19", "radix": 8 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error message").contains("Invalid digit '9'"));
}

#[tokio::test]
async fn clock_with_inputs_for_another_kind_is_rejected() {
    let workbench = Arc::new(Workbench::default());
    let (status, body) = send(
        router(workbench.clone()),
        "POST",
        "/v1/flipflop/clock",
        Some(json!({ "inputs": { "kind": "D", "d": true } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error message").contains("JK flip-flop"));

    let (status, body) = send(
        router(workbench.clone()),
        "POST",
        "/v1/flipflop/clock",
        Some(json!({ "inputs": { "kind": "JK", "j": true, "k": true } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous"], json!({ "kind": "JK", "state": false }));
    assert_eq!(body["current"], json!({ "kind": "JK", "state": true }));

    let (status, body) = send(router(workbench), "GET", "/v1/flipflop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], true);
}

#[tokio::test]
async fn query_runs_scripts() {
    let (status, body) = send(app(), "POST", "/v1/query", Some(json!({ "script": "gate xor 1 0" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["rows"], json!([["1"]]));

    let (status, body) = send(app(), "POST", "/v1/query", Some(json!({ "script": "launch rockets" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn simplify_and_truth_table_endpoints() {
    let (status, body) = send(app(), "POST", "/v1/simplify", Some(json!({ "expression": "A+A''" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "A");

    let (status, body) = send(app(), "GET", "/v1/truth-table", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("rows").len(), 4);
}
