use async_trait::async_trait;

use crate::error::GenerationError;
use crate::request::GenerationRequest;
use crate::response::ModelResponse;

/// A multimodal model that turns a composed request into response parts.
///
/// Implementations make exactly one attempt per call; retries are the
/// caller's decision.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<ModelResponse, GenerationError>;
}
