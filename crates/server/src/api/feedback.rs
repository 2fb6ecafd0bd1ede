use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use tryon_pipeline::{FeedbackReceipt, FeedbackSubmission, FeedbackSummary};

use crate::error::ServerError;

use super::AppState;
use super::schemas::ErrorResponse;

/// `POST /api/feedback` -- rate a completed try-on.
#[utoipa::path(
    post,
    path = "/api/feedback",
    tag = "Feedback",
    summary = "Submit feedback",
    request_body(content = FeedbackSubmission, description = "Rating from 1 to 5 with optional comment"),
    responses(
        (status = 200, description = "Feedback recorded", body = FeedbackReceipt),
        (status = 400, description = "Rating out of range", body = ErrorResponse),
        (status = 404, description = "Try-on not found", body = ErrorResponse)
    )
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackSubmission>, JsonRejection>,
) -> Result<Json<FeedbackReceipt>, ServerError> {
    let Json(submission) = payload?;
    Ok(Json(state.pipeline.submit_feedback(submission).await?))
}

/// `GET /api/feedback/all` -- list feedback with daily statistics.
#[utoipa::path(
    get,
    path = "/api/feedback/all",
    tag = "Feedback",
    summary = "List feedback",
    description = "Returns all feedback newest first, with per-day counts and average ratings.",
    responses(
        (status = 200, description = "Feedback summary", body = FeedbackSummary)
    )
)]
pub async fn list_feedback(
    State(state): State<AppState>,
) -> Result<Json<FeedbackSummary>, ServerError> {
    Ok(Json(state.pipeline.feedback_summary().await?))
}
