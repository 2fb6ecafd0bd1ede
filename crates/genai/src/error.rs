use thiserror::Error;

/// Errors that can occur while calling the generation model.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// HTTP transport failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out.
    #[error("generation request timed out after {0}s")]
    Timeout(u64),

    /// The model API returned a non-success status.
    #[error("generation API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body was not the expected shape.
    #[error("failed to parse generation response: {0}")]
    Parse(String),

    /// The client could not be set up.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Errors produced while pulling the result image out of a model response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The response carried no inline image data.
    #[error("model returned no image")]
    NoImageProduced {
        /// Leading text the model returned instead, for the operator log.
        model_text: String,
    },
}
