use async_trait::async_trait;

use crate::error::NotifyError;
use crate::payload::NotificationPayload;

/// A sink that receives completed try-ons.
///
/// One call is one delivery attempt. Callers that must not block on the sink
/// go through [`NotificationDispatcher`](crate::NotificationDispatcher).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, payload: &NotificationPayload) -> Result<(), NotifyError>;
}
