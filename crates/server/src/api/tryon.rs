use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};

use tryon_pipeline::{TryOnOutcome, TryOnPayload};

use crate::error::ServerError;

use super::AppState;
use super::schemas::ErrorResponse;

/// `POST /api/tryon` -- run one virtual try-on.
///
/// Both images must be inline base64, or both must be upload ids.
#[utoipa::path(
    post,
    path = "/api/tryon",
    tag = "Try-On",
    summary = "Create try-on",
    description = "Dresses the person in the subject image with the garment from the garment image and persists the result.",
    request_body(content = TryOnPayload, description = "Subject and garment images"),
    responses(
        (status = 200, description = "Try-on completed", body = TryOnOutcome),
        (status = 400, description = "Malformed or ambiguous request", body = ErrorResponse),
        (status = 404, description = "Upload id not found", body = ErrorResponse),
        (status = 502, description = "Generation failed or returned no image", body = ErrorResponse),
        (status = 500, description = "Persistence failed", body = ErrorResponse)
    )
)]
pub async fn create_tryon(
    State(state): State<AppState>,
    payload: Result<Json<TryOnPayload>, JsonRejection>,
) -> Result<Json<TryOnOutcome>, ServerError> {
    let Json(payload) = payload?;
    let outcome = state.pipeline.run_payload(payload).await?;
    Ok(Json(outcome))
}

/// `GET /api/tryon/{id}` -- fetch a stored try-on result.
#[utoipa::path(
    get,
    path = "/api/tryon/{id}",
    tag = "Try-On",
    summary = "Get try-on",
    params(("id" = String, Path, description = "Try-on id")),
    responses(
        (status = 200, description = "Stored try-on", body = TryOnOutcome),
        (status = 404, description = "Try-on not found", body = ErrorResponse)
    )
)]
pub async fn get_tryon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TryOnOutcome>, ServerError> {
    let record = state.pipeline.get_tryon(&id).await?;
    Ok(Json(TryOnOutcome::from(&record)))
}
