use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::error::TryOnError;

/// Atomic counters tracking pipeline outcomes.
///
/// All counters use relaxed ordering. For a point-in-time view, call
/// [`snapshot`](Self::snapshot).
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Try-on runs started.
    pub requests: AtomicU64,
    /// Try-on runs that persisted a record.
    pub completed: AtomicU64,
    pub invalid_request: AtomicU64,
    pub not_found: AtomicU64,
    pub generation_failed: AtomicU64,
    pub no_image_produced: AtomicU64,
    pub persistence_failed: AtomicU64,
    /// Images staged through the upload operation.
    pub uploads: AtomicU64,
    /// Feedback submissions accepted.
    pub feedback: AtomicU64,
}

impl PipelineMetrics {
    pub fn increment_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_uploads(&self) {
        self.uploads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_feedback(&self) {
        self.feedback.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a failed run under its error kind.
    pub fn record_failure(&self, err: &TryOnError) {
        let counter = match err {
            TryOnError::InvalidRequest(_) => &self.invalid_request,
            TryOnError::UploadNotFound { .. } | TryOnError::TryOnNotFound(_) => &self.not_found,
            TryOnError::GenerationFailed(_) => &self.generation_failed,
            TryOnError::NoImageProduced { .. } => &self.no_image_produced,
            TryOnError::PersistenceFailed(_) => &self.persistence_failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            invalid_request: self.invalid_request.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            generation_failed: self.generation_failed.load(Ordering::Relaxed),
            no_image_produced: self.no_image_produced.load(Ordering::Relaxed),
            persistence_failed: self.persistence_failed.load(Ordering::Relaxed),
            uploads: self.uploads.load(Ordering::Relaxed),
            feedback: self.feedback.load(Ordering::Relaxed),
            notifications_dispatched: 0,
            notifications_delivered: 0,
            notifications_failed: 0,
            notifications_timed_out: 0,
        }
    }
}

/// A plain data snapshot of [`PipelineMetrics`], plus notification outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub completed: u64,
    pub invalid_request: u64,
    pub not_found: u64,
    pub generation_failed: u64,
    pub no_image_produced: u64,
    pub persistence_failed: u64,
    pub uploads: u64,
    pub feedback: u64,
    pub notifications_dispatched: u64,
    pub notifications_delivered: u64,
    pub notifications_failed: u64,
    pub notifications_timed_out: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_zero() {
        assert_eq!(PipelineMetrics::default().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn failures_counted_by_kind() {
        let m = PipelineMetrics::default();
        m.increment_requests();
        m.increment_requests();
        m.increment_requests();
        m.increment_completed();
        m.record_failure(&TryOnError::GenerationFailed("x".into()));
        m.record_failure(&TryOnError::NoImageProduced {
            model_text: String::new(),
        });

        let snap = m.snapshot();
        assert_eq!(snap.requests, 3);
        assert_eq!(snap.completed, 1);
        assert_eq!(snap.generation_failed, 1);
        assert_eq!(snap.no_image_produced, 1);
        assert_eq!(snap.persistence_failed, 0);
    }
}
