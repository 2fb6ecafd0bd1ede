use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::error::ServerError;

use super::AppState;
use super::schemas::{ErrorResponse, StatusCheckRequest, StatusCheckResponse};

/// Most status checks returned by one listing.
pub const STATUS_LIST_LIMIT: usize = 1000;

/// `POST /api/status` -- record a client liveness ping.
#[utoipa::path(
    post,
    path = "/api/status",
    tag = "Status",
    summary = "Record status check",
    request_body(content = StatusCheckRequest),
    responses(
        (status = 200, description = "Status check recorded", body = StatusCheckResponse),
        (status = 400, description = "Missing client name", body = ErrorResponse)
    )
)]
pub async fn create_status_check(
    State(state): State<AppState>,
    payload: Result<Json<StatusCheckRequest>, JsonRejection>,
) -> Result<Json<StatusCheckResponse>, ServerError> {
    let Json(request) = payload?;
    let check = state.pipeline.record_status_check(&request.client_name).await?;
    Ok(Json(check.into()))
}

/// `GET /api/status` -- list recorded status checks, oldest first.
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "Status",
    summary = "List status checks",
    responses(
        (status = 200, description = "Recorded status checks", body = Vec<StatusCheckResponse>)
    )
)]
pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheckResponse>>, ServerError> {
    let checks = state.pipeline.status_checks(STATUS_LIST_LIMIT).await?;
    Ok(Json(checks.into_iter().map(Into::into).collect()))
}
