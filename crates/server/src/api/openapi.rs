#![allow(clippy::needless_for_each)]

use tryon_core::{EncodedImage, ImageRole, TryOnStatus};
use tryon_pipeline::{
    DailyStat, FeedbackItem, FeedbackReceipt, FeedbackSubmission, FeedbackSummary,
    MetricsSnapshot, TryOnOutcome, TryOnPayload, UploadPayload, UploadReceipt,
};

use super::schemas::{
    ErrorResponse, HealthResponse, RootResponse, StatusCheckRequest, StatusCheckResponse,
};

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Virtual Try-On API",
        version = "0.1.0",
        description = "Generate images of a person wearing a garment from two photographs, and collect feedback on the results.",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "Health", description = "Service health and metrics"),
        (name = "Try-On", description = "Try-on generation and lookup"),
        (name = "Uploads", description = "Image staging for later use by id"),
        (name = "Feedback", description = "Customer ratings of try-on results"),
        (name = "Status", description = "Client liveness pings")
    ),
    paths(
        super::health::root,
        super::health::health,
        super::health::metrics,
        super::tryon::create_tryon,
        super::tryon::get_tryon,
        super::uploads::upload,
        super::feedback::submit_feedback,
        super::feedback::list_feedback,
        super::status::create_status_check,
        super::status::list_status_checks,
    ),
    components(schemas(
        ErrorResponse, RootResponse, HealthResponse, MetricsSnapshot,
        TryOnPayload, TryOnOutcome, TryOnStatus, EncodedImage,
        UploadPayload, UploadReceipt, ImageRole,
        FeedbackSubmission, FeedbackReceipt, FeedbackSummary, FeedbackItem, DailyStat,
        StatusCheckRequest, StatusCheckResponse,
    ))
)]
pub struct ApiDoc;
