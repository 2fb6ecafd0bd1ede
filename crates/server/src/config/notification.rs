use std::collections::HashMap;

use serde::Deserialize;

/// Notification sink for completed try-ons. Disabled unless a URL is set.
#[derive(Debug, Deserialize)]
pub struct NotificationConfig {
    /// Webhook that receives one POST per completed try-on.
    pub webhook_url: Option<String>,
    /// Upper bound on one delivery attempt, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Extra headers sent with every delivery.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_seconds: default_timeout(),
            headers: HashMap::new(),
        }
    }
}

impl NotificationConfig {
    pub fn enabled(&self) -> bool {
        self.webhook_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

fn default_timeout() -> u64 {
    10
}
