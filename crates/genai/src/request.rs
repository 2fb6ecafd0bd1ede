use bytes::Bytes;

use tryon_core::AspectRatio;

use crate::variant::Modality;

/// One input part of a multimodal request.
#[derive(Clone, PartialEq, Eq)]
pub enum RequestPart {
    /// Raw image bytes with the mime type the model should assume.
    Image { mime_type: &'static str, data: Bytes },
    /// Instruction text.
    Text(String),
}

impl RequestPart {
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image { .. } => None,
        }
    }
}

impl std::fmt::Debug for RequestPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image { mime_type, data } => f
                .debug_struct("Image")
                .field("mime_type", mime_type)
                .field("len", &data.len())
                .finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

/// Output settings for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub modalities: Vec<Modality>,
    /// Requested canvas shape; `None` when the model takes no hint.
    pub aspect_ratio: Option<AspectRatio>,
}

/// A fully composed, transport-independent generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub parts: Vec<RequestPart>,
    pub config: GenerationConfig,
}
