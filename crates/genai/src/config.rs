/// Default Gemini REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini HTTP client.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API base, without a trailing slash (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    pub endpoint: String,
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl GeminiConfig {
    /// Create a config for the public endpoint with the given API key.
    ///
    /// Image generation is slow, so the default timeout is 120s.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: api_key.into(),
            timeout_seconds: 120,
        }
    }

    /// Point the client at a different API base.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_owned();
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GeminiConfig::new("key");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn config_builder() {
        let config = GeminiConfig::new("key")
            .with_endpoint("http://127.0.0.1:9000/v1/")
            .with_timeout(5);
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/v1");
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn debug_redacts_key() {
        let debug = format!("{:?}", GeminiConfig::new("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
