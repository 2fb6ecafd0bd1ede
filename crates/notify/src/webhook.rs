use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::WebhookConfig;
use crate::error::NotifyError;
use crate::notifier::Notifier;
use crate::payload::NotificationPayload;

/// Posts each payload as JSON to a fixed URL.
pub struct WebhookNotifier {
    config: WebhookConfig,
    client: Client,
}

impl WebhookNotifier {
    /// Create a notifier with a client using the configured timeout.
    pub fn new(config: WebhookConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotifyError::Configuration(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    #[instrument(skip_all, fields(try_on_id = %payload.try_on_id))]
    async fn notify(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        let body =
            serde_json::to_vec(payload).map_err(|e| NotifyError::InvalidPayload(e.to_string()))?;

        debug!(url = %self.config.url, bytes = body.len(), "posting notification");

        let mut request = self
            .client
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .body(body);
        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "notification sink returned error");
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
