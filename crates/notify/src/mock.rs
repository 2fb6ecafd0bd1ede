use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::notifier::Notifier;
use crate::payload::NotificationPayload;

/// A notifier that keeps every payload it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<NotificationPayload>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All payloads received so far, in arrival order.
    pub fn received(&self) -> Vec<NotificationPayload> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }

    /// Try-on ids of the payloads received so far.
    pub fn received_ids(&self) -> Vec<String> {
        self.received()
            .into_iter()
            .map(|payload| payload.try_on_id)
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(payload.clone());
        }
        Ok(())
    }
}

/// A notifier whose every attempt fails as if the sink rejected it.
#[derive(Debug, Clone)]
pub struct FailingNotifier {
    error_message: String,
}

impl FailingNotifier {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
        }
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _payload: &NotificationPayload) -> Result<(), NotifyError> {
        Err(NotifyError::UnexpectedStatus {
            status: 502,
            body: self.error_message.clone(),
        })
    }
}
