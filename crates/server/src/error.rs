use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use tryon_pipeline::TryOnError;

use crate::api::schemas::ErrorResponse;

/// Errors that can occur when running the try-on server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The request body could not be read as the expected JSON shape.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// A pipeline error surfaced through the API.
    #[error(transparent)]
    TryOn(#[from] TryOnError),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl ServerError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::TryOn(e) => match e {
                TryOnError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                TryOnError::UploadNotFound { .. } | TryOnError::TryOnNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                TryOnError::GenerationFailed(_) | TryOnError::NoImageProduced { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                TryOnError::PersistenceFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Stable, machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::Io(_) => "internal",
            Self::InvalidBody(_) => "invalid_request",
            Self::TryOn(e) => e.kind(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_owned(),
        };
        (status, axum::Json(body)).into_response()
    }
}
