use std::collections::HashMap;
use std::time::Duration;

/// Configuration for the webhook notification sink.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Target URL; the payload is POSTed here as JSON.
    pub url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra headers sent with every request.
    pub headers: HashMap<String, String>,
}

impl WebhookConfig {
    /// Create a config for `url` with a 10s timeout and no extra headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(10),
            headers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}
