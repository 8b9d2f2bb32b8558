//! HTTP API
//!
//! Routes served by `codeq serve`:
//! - `POST /api/analyze`: full report for `{code, language}`
//! - `POST /api/explain`: AI explanation of one issue
//! - `GET /api/health`: liveness and version

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use codeq_core::{
    AnalyzeRequest, AnalyzeResponse, CodeqError, ExplainRequest, Language, QualityEngine,
    ServerConfig, VERSION,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub engine: QualityEngine,
}

/// Body of `POST /api/explain`
#[derive(Debug, Deserialize)]
pub struct ExplainPayload {
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub code: String,
    /// Language tag; JavaScript when omitted
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub line: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Errors surfaced to API clients as `{"error": message}`
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CodeqError> for ApiError {
    fn from(error: CodeqError) -> Self {
        match error {
            CodeqError::InvalidInput { message } => ApiError::BadRequest(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload?;

    let response = state.engine.analyze(&request.code, request.language).await?;
    Ok(Json(response))
}

async fn explain(
    State(state): State<AppState>,
    payload: Result<Json<ExplainPayload>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let Json(payload) = payload?;
    let request = ExplainRequest {
        issue: payload.issue,
        code: payload.code,
        language: payload.language,
        line: payload.line,
    };

    let explanation = state.engine.explain(&request).await?;
    Ok(Json(ExplainResponse { explanation }))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: VERSION,
    })
}

/// Router with tracing, timeout and optional CORS layers
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/explain", post(explain))
        .route("/api/health", get(health))
        .with_state(state);

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    let service = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )));

    router.layer(service)
}

/// Bind and serve until Ctrl-C
pub async fn serve(engine: QualityEngine, config: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let ai_enabled = engine.ai_enabled();
    let router = create_router(AppState { engine }, config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(%addr, ai_enabled, "codeq server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
