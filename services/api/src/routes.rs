use crate::export::{export_filename, render_csv};
use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use morphbox::domain::{Combination, MorphologicalBox};
use morphbox::error::AppError;
use morphbox::explorer::{Assessment, ExploreOptions, Exploration, ExplorerService};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateRequest {
    #[serde(rename = "box")]
    pub(crate) explorer_box: MorphologicalBox,
    #[serde(flatten)]
    pub(crate) options: ExploreOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    #[serde(rename = "box")]
    pub(crate) explorer_box: MorphologicalBox,
    pub(crate) combination: Combination,
}

pub(crate) fn explorer_router(service: Arc<ExplorerService>) -> Router {
    Router::new()
        .route("/api/v1/combinations/generate", post(generate_endpoint))
        .route("/api/v1/combinations/evaluate", post(evaluate_endpoint))
        .route("/api/v1/combinations/export", post(export_endpoint))
        .with_state(service)
}

pub(crate) fn with_explorer_routes(service: Arc<ExplorerService>) -> Router {
    explorer_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn generate_endpoint(
    State(service): State<Arc<ExplorerService>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<Exploration>, AppError> {
    let exploration = service.explore(&payload.explorer_box, &payload.options)?;
    info!(
        box_name = %payload.explorer_box.name,
        total = %exploration.sample.total,
        sample_size = exploration.sample.sample.len(),
        "generated combination sample"
    );
    Ok(Json(exploration))
}

pub(crate) async fn evaluate_endpoint(
    State(service): State<Arc<ExplorerService>>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<Assessment>, AppError> {
    let assessment = service.assess(&payload.explorer_box, &payload.combination)?;
    Ok(Json(assessment))
}

/// Generate, rank, and return the sample as a CSV attachment.
pub(crate) async fn export_endpoint(
    State(service): State<Arc<ExplorerService>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let options = ExploreOptions {
        rank: true,
        ..payload.options
    };
    let exploration = service.explore(&payload.explorer_box, &options)?;
    let ranked = exploration.ranked.unwrap_or_default();
    let body = render_csv(&payload.explorer_box, &ranked)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(&exploration.sample.timestamp)
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
