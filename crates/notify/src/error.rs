use thiserror::Error;

/// Errors from a single notification attempt.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The sink returned a non-success status code.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The payload could not be serialized.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The notifier could not be set up.
    #[error("configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = NotifyError::UnexpectedStatus {
            status: 503,
            body: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "unexpected status 503: unavailable");

        let err = NotifyError::InvalidPayload("bad json".into());
        assert_eq!(err.to_string(), "invalid payload: bad json");
    }
}
