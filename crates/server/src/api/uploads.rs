use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use tryon_pipeline::{UploadPayload, UploadReceipt};

use crate::error::ServerError;

use super::AppState;
use super::schemas::ErrorResponse;

/// `POST /api/upload` -- stage an image and return its upload id.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Uploads",
    summary = "Upload image",
    request_body(content = UploadPayload, description = "Base64 image and optional role"),
    responses(
        (status = 200, description = "Image staged", body = UploadReceipt),
        (status = 400, description = "Empty or invalid base64", body = ErrorResponse)
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    payload: Result<Json<UploadPayload>, JsonRejection>,
) -> Result<Json<UploadReceipt>, ServerError> {
    let Json(payload) = payload?;
    let receipt = state
        .pipeline
        .stage_upload(&payload.image, payload.role)
        .await?;
    Ok(Json(receipt))
}
