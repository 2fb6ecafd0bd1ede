use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use tryon_pipeline::MetricsSnapshot;

use super::AppState;
use super::schemas::{HealthResponse, RootResponse};

/// `GET /api/` -- service banner.
#[utoipa::path(
    get,
    path = "/api/",
    tag = "Health",
    summary = "Service banner",
    responses(
        (status = 200, description = "Service is running", body = RootResponse)
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Virtual Try-On API is running".into(),
    })
}

/// `GET /health` -- returns service status together with a metrics snapshot.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "Health check",
    description = "Returns service status and a snapshot of pipeline metrics.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "ok".into(),
        metrics: state.pipeline.metrics(),
    };
    (StatusCode::OK, Json(body))
}

/// `GET /metrics` -- returns pipeline metrics as JSON.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    summary = "Pipeline metrics",
    description = "Returns current try-on, upload, feedback and notification counters.",
    responses(
        (status = 200, description = "Current metric counters", body = MetricsSnapshot)
    )
)]
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.pipeline.metrics()))
}
