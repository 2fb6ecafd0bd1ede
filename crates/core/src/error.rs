use thiserror::Error;

/// Errors raised when turning a text-safe image payload back into bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageDecodeError {
    /// The payload was empty (or only a data-URL prefix).
    #[error("image payload is empty")]
    Empty,

    /// The payload was not valid standard base64.
    #[error("image payload is not valid base64: {0}")]
    InvalidBase64(String),
}
