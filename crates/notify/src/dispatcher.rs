use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::FutureExt;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use crate::notifier::Notifier;
use crate::payload::NotificationPayload;

/// Outcome counters for dispatched notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub dispatched: u64,
    pub delivered: u64,
    pub failed: u64,
    pub timed_out: u64,
}

#[derive(Debug, Default)]
struct Counters {
    dispatched: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
    timed_out: AtomicU64,
}

/// Runs notification attempts on detached, tracked tasks.
///
/// [`dispatch`](Self::dispatch) returns immediately. Each attempt is bounded
/// by the configured timeout; errors, timeouts and panics inside the attempt
/// are logged and counted, never returned.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    tracker: TaskTracker,
    timeout: Duration,
    counters: Arc<Counters>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, timeout: Duration) -> Self {
        Self {
            notifier,
            tracker: TaskTracker::new(),
            timeout,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Schedule one delivery attempt for `payload` and return.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, payload: NotificationPayload) {
        self.counters.dispatched.fetch_add(1, Ordering::Relaxed);
        let notifier = Arc::clone(&self.notifier);
        let counters = Arc::clone(&self.counters);
        let timeout = self.timeout;

        self.tracker.spawn(async move {
            let try_on_id = payload.try_on_id.clone();
            let attempt = AssertUnwindSafe(tokio::time::timeout(timeout, async {
                notifier.notify(&payload).await
            }))
            .catch_unwind()
            .await;

            match attempt {
                Ok(Ok(Ok(()))) => {
                    counters.delivered.fetch_add(1, Ordering::Relaxed);
                    debug!(%try_on_id, "notification delivered");
                }
                Ok(Ok(Err(e))) => {
                    counters.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(%try_on_id, error = %e, "notification failed");
                }
                Ok(Err(_)) => {
                    counters.timed_out.fetch_add(1, Ordering::Relaxed);
                    warn!(%try_on_id, timeout_ms = timeout.as_millis(), "notification timed out");
                }
                Err(_) => {
                    counters.failed.fetch_add(1, Ordering::Relaxed);
                    error!(%try_on_id, "notification task panicked");
                }
            }
        });
    }

    /// Snapshot of the outcome counters.
    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            dispatched: self.counters.dispatched.load(Ordering::Relaxed),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            timed_out: self.counters.timed_out.load(Ordering::Relaxed),
        }
    }

    /// Number of attempts still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Stop accepting new attempts and wait for running ones to finish.
    ///
    /// Attempts already dispatched still run to completion or timeout.
    pub async fn shutdown(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        info!("notification dispatcher drained");
    }

    /// Wait for in-flight attempts, then keep accepting new ones.
    ///
    /// Must not race with [`shutdown`](Self::shutdown), which it would undo.
    pub async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("timeout", &self.timeout)
            .field("in_flight", &self.tracker.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tryon_core::{EncodedImage, TryOnRecord};

    use super::*;
    use crate::error::NotifyError;
    use crate::mock::{FailingNotifier, RecordingNotifier};

    fn payload() -> NotificationPayload {
        NotificationPayload::from_record(&TryOnRecord::completed(
            EncodedImage::from_bytes(b"p"),
            EncodedImage::from_bytes(b"c"),
            EncodedImage::from_bytes(b"r"),
        ))
    }

    struct SlowNotifier(Duration);

    #[async_trait]
    impl Notifier for SlowNotifier {
        async fn notify(&self, _payload: &NotificationPayload) -> Result<(), NotifyError> {
            tokio::time::sleep(self.0).await;
            Ok(())
        }
    }

    struct PanickingNotifier;

    #[async_trait]
    impl Notifier for PanickingNotifier {
        async fn notify(&self, _payload: &NotificationPayload) -> Result<(), NotifyError> {
            panic!("sink exploded");
        }
    }

    #[tokio::test]
    async fn delivers_on_detached_task() {
        let notifier = Arc::new(RecordingNotifier::new());
        let dispatcher = NotificationDispatcher::new(notifier.clone(), Duration::from_secs(5));
        let payload = payload();
        let id = payload.try_on_id.clone();

        dispatcher.dispatch(payload);
        dispatcher.shutdown().await;

        assert_eq!(notifier.received_ids(), vec![id]);
        let stats = dispatcher.stats();
        assert_eq!(stats.dispatched, 1);
        assert_eq!(stats.delivered, 1);
    }

    #[tokio::test]
    async fn failures_are_counted_not_returned() {
        let dispatcher = NotificationDispatcher::new(
            Arc::new(FailingNotifier::new("sink down")),
            Duration::from_secs(5),
        );
        dispatcher.dispatch(payload());
        dispatcher.dispatch(payload());
        dispatcher.shutdown().await;

        let stats = dispatcher.stats();
        assert_eq!(stats.dispatched, 2);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.delivered, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_sink_is_cut_off() {
        let dispatcher = NotificationDispatcher::new(
            Arc::new(SlowNotifier(Duration::from_secs(60))),
            Duration::from_secs(2),
        );
        dispatcher.dispatch(payload());
        dispatcher.shutdown().await;

        let stats = dispatcher.stats();
        assert_eq!(stats.timed_out, 1);
        assert_eq!(stats.delivered, 0);
    }

    #[tokio::test]
    async fn panicking_sink_is_contained() {
        let dispatcher =
            NotificationDispatcher::new(Arc::new(PanickingNotifier), Duration::from_secs(5));
        dispatcher.dispatch(payload());
        dispatcher.shutdown().await;
        assert_eq!(dispatcher.stats().failed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dispatch_does_not_wait_for_delivery() {
        let dispatcher = NotificationDispatcher::new(
            Arc::new(SlowNotifier(Duration::from_secs(30))),
            Duration::from_secs(60),
        );
        let started = tokio::time::Instant::now();
        dispatcher.dispatch(payload());
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(dispatcher.in_flight(), 1);

        dispatcher.shutdown().await;
        assert_eq!(dispatcher.stats().delivered, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_idle_drains_and_stays_open() {
        let notifier = Arc::new(RecordingNotifier::new());
        let slow = NotificationDispatcher::new(
            Arc::new(SlowNotifier(Duration::from_secs(3))),
            Duration::from_secs(10),
        );
        slow.dispatch(payload());
        slow.wait_idle().await;
        assert_eq!(slow.in_flight(), 0);
        assert_eq!(slow.stats().delivered, 1);

        let dispatcher = NotificationDispatcher::new(notifier.clone(), Duration::from_secs(5));
        dispatcher.dispatch(payload());
        dispatcher.wait_idle().await;
        dispatcher.dispatch(payload());
        dispatcher.wait_idle().await;
        assert_eq!(notifier.received().len(), 2);
        assert_eq!(dispatcher.stats().delivered, 2);
    }
}
