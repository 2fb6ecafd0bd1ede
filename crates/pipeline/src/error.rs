use thiserror::Error;

use tryon_core::ImageRole;
use tryon_genai::{ExtractError, GenerationError};
use tryon_store::StoreError;

/// Every way a try-on operation can fail, as seen by the caller.
#[derive(Debug, Error)]
pub enum TryOnError {
    /// The request shape is malformed or ambiguous.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A referenced upload token does not exist.
    #[error("{role} upload not found: {token}")]
    UploadNotFound { role: ImageRole, token: String },

    /// A referenced try-on does not exist.
    #[error("try-on not found: {0}")]
    TryOnNotFound(String),

    /// The generation model could not be reached or rejected the call.
    #[error("image generation failed: {0}")]
    GenerationFailed(String),

    /// The model answered but returned no usable image.
    #[error("the model did not return an image")]
    NoImageProduced {
        /// Leading text the model returned instead.
        model_text: String,
    },

    /// A durable read or write failed.
    #[error("persistence failed: {0}")]
    PersistenceFailed(String),
}

/// Returned by [`PipelineBuilder::build`](crate::PipelineBuilder::build) when a
/// required component was not supplied.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("pipeline configuration error: {0} is required")]
pub struct BuildError(pub &'static str);

impl TryOnError {
    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::UploadNotFound { .. } | Self::TryOnNotFound(_) => "not_found",
            Self::GenerationFailed(_) => "generation_failed",
            Self::NoImageProduced { .. } => "no_image_produced",
            Self::PersistenceFailed(_) => "persistence_failed",
        }
    }
}

impl From<StoreError> for TryOnError {
    fn from(err: StoreError) -> Self {
        Self::PersistenceFailed(err.to_string())
    }
}

impl From<GenerationError> for TryOnError {
    fn from(err: GenerationError) -> Self {
        Self::GenerationFailed(err.to_string())
    }
}

impl From<ExtractError> for TryOnError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::NoImageProduced { model_text } => Self::NoImageProduced { model_text },
        }
    }
}
