use bytes::Bytes;

/// Binary payload of an inline part, in whichever form the transport
/// delivered it.
#[derive(Clone, PartialEq, Eq)]
pub enum InlinePayload {
    /// Already base64 text, as returned by the REST API.
    Base64(String),
    /// Decoded bytes.
    Raw(Bytes),
}

impl InlinePayload {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Base64(text) => text.is_empty(),
            Self::Raw(bytes) => bytes.is_empty(),
        }
    }
}

impl std::fmt::Debug for InlinePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64(text) => write!(f, "Base64({} chars)", text.len()),
            Self::Raw(bytes) => write!(f, "Raw({} bytes)", bytes.len()),
        }
    }
}

/// One part of a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    InlineData {
        mime_type: Option<String>,
        data: InlinePayload,
    },
}

/// The ordered parts of a model response, flattened across candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelResponse {
    pub parts: Vec<Part>,
}

impl ModelResponse {
    pub fn new(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// A response holding a single base64 image part.
    pub fn image(mime_type: &str, base64: impl Into<String>) -> Self {
        Self::new(vec![Part::InlineData {
            mime_type: Some(mime_type.to_owned()),
            data: InlinePayload::Base64(base64.into()),
        }])
    }

    /// A response holding a single text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Part::Text(text.into())])
    }

    /// Concatenated text parts.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text(text) => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}
