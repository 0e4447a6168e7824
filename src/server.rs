use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::codes::{transcode, CodeKind};
use crate::complement::{complement_text, Complements};
use crate::engine::Engine;
use crate::error::DigilogicError;
use crate::flipflop::{FlipFlop, FlipFlopInputs, FlipFlopKind};
use crate::gate::{evaluate, truth_table, GateKind, TruthRow};
use crate::radix::{convert, Conversion, Radix};
use crate::simplify::{simplify_traced, Simplification};
use crate::workbench::Workbench;

type Shared = State<Arc<Workbench>>;

/// Error body returned for every failed request.
pub struct ApiError(pub DigilogicError);

impl From<DigilogicError> for ApiError {
    fn from(e: DigilogicError) -> Self { Self(e) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_input_error() { StatusCode::BAD_REQUEST } else { StatusCode::INTERNAL_SERVER_ERROR };
        let msg = self.0.to_string();
        warn!(%msg, code = %status.as_u16(), "request error");
        (status, Json(json!({ "error": msg }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

#[derive(Deserialize)]
pub struct QueryRequest {
    pub script: String,
}

#[derive(Serialize)]
pub struct QueryResponse {
    pub status: String,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct ConvertRequest {
    pub digits: String,
    pub radix: Radix,
}

#[derive(Deserialize)]
pub struct CodeRequest {
    pub bits: String,
    pub code: CodeKind,
}

#[derive(Serialize)]
pub struct CodeResponse {
    pub code: String,
}

#[derive(Deserialize)]
pub struct BitsRequest {
    pub bits: String,
}

#[derive(Deserialize)]
pub struct SimplifyRequest {
    pub expression: String,
}

#[derive(Deserialize)]
pub struct GateRequest {
    pub gate: GateKind,
    pub a: bool,
    #[serde(default)]
    pub b: Option<bool>,
}

#[derive(Serialize)]
pub struct GateResponse {
    pub output: bool,
}

#[derive(Deserialize)]
pub struct SelectRequest {
    pub kind: FlipFlopKind,
}

#[derive(Deserialize)]
pub struct ClockRequest {
    pub inputs: FlipFlopInputs,
}

#[derive(Serialize)]
pub struct ClockResponse {
    pub previous: FlipFlop,
    pub current: FlipFlop,
}

async fn query(State(workbench): Shared, Json(req): Json<QueryRequest>) -> (StatusCode, Json<QueryResponse>) {
    // The engine is synchronous, so it runs on a blocking thread.
    let started = Instant::now();
    let script = req.script;
    let joined = tokio::task::spawn_blocking(move || Engine::new(&workbench).execute_collect(&script)).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let outcome = joined.unwrap_or_else(|e| {
        warn!(error = %e, "Join error");
        Err(DigilogicError::Io(format!("query task failed: {e}")))
    });
    match outcome {
        Ok(result) => {
            info!(ms = elapsed_ms, rows = result.row_count, "query complete");
            let body = QueryResponse {
                status: "ok".into(),
                elapsed_ms,
                columns: Some(result.columns),
                row_count: Some(result.row_count),
                rows: Some(result.rows),
                error: None,
            };
            (StatusCode::OK, Json(body))
        }
        Err(e) => {
            let status = if e.is_input_error() { StatusCode::BAD_REQUEST } else { StatusCode::INTERNAL_SERVER_ERROR };
            let msg = e.to_string();
            warn!(%msg, code = %status.as_u16(), "query error");
            let body = QueryResponse { status: "error".into(), elapsed_ms, columns: None, row_count: None, rows: None, error: Some(msg) };
            (status, Json(body))
        }
    }
}

async fn convert_digits(Json(req): Json<ConvertRequest>) -> ApiResult<Conversion> {
    Ok(Json(convert(&req.digits, req.radix)?))
}

async fn code(Json(req): Json<CodeRequest>) -> ApiResult<CodeResponse> {
    Ok(Json(CodeResponse { code: transcode(req.code, &req.bits)?.into_string() }))
}

async fn complement(Json(req): Json<BitsRequest>) -> ApiResult<Complements> {
    Ok(Json(complement_text(&req.bits)?))
}

async fn simplify(Json(req): Json<SimplifyRequest>) -> ApiResult<Simplification> {
    Ok(Json(simplify_traced(&req.expression)?))
}

async fn gate(Json(req): Json<GateRequest>) -> Json<GateResponse> {
    Json(GateResponse { output: evaluate(req.gate, req.a, req.b) })
}

async fn truth() -> Json<Vec<TruthRow>> {
    Json(truth_table().to_vec())
}

async fn flip_flop(State(workbench): Shared) -> Json<FlipFlop> {
    Json(workbench.flip_flop())
}

async fn select(State(workbench): Shared, Json(req): Json<SelectRequest>) -> Json<FlipFlop> {
    Json(workbench.select(req.kind))
}

async fn clock(State(workbench): Shared, Json(req): Json<ClockRequest>) -> ApiResult<ClockResponse> {
    let (previous, current) = workbench.clock(req.inputs)?;
    Ok(Json(ClockResponse { previous, current }))
}

async fn reset(State(workbench): Shared) -> Json<FlipFlop> {
    Json(workbench.reset())
}

pub fn router(workbench: Arc<Workbench>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    Router::new()
        .route("/v1/query", post(query))
        .route("/v1/convert", post(convert_digits))
        .route("/v1/code", post(code))
        .route("/v1/complement", post(complement))
        .route("/v1/simplify", post(simplify))
        .route("/v1/gate", post(gate))
        .route("/v1/truth-table", get(truth))
        .route("/v1/flipflop", get(flip_flop))
        .route("/v1/flipflop/select", post(select))
        .route("/v1/flipflop/clock", post(clock))
        .route("/v1/flipflop/reset", post(reset))
        .layer(cors)
        .with_state(workbench)
}
