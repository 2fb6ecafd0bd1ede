use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;

use tryon_core::{
    EncodedImage, FeedbackEntry, FeedbackRecord, StatusCheck, TryOnRecord, UploadRecord,
};
use tryon_store::{StoreError, TryOnStore};

/// In-memory implementation of [`TryOnStore`] backed by [`DashMap`].
///
/// Suitable for tests and single-process deployments. Nothing survives a
/// restart.
#[derive(Debug, Default)]
pub struct MemoryTryOnStore {
    uploads: DashMap<String, UploadRecord>,
    tryons: DashMap<String, TryOnRecord>,
    feedback_serial: AtomicU64,
    status_checks: RwLock<Vec<StatusCheck>>,
}

impl MemoryTryOnStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted try-on records.
    pub fn tryon_count(&self) -> usize {
        self.tryons.len()
    }

    /// Number of staged uploads.
    pub fn upload_count(&self) -> usize {
        self.uploads.len()
    }
}

#[async_trait]
impl TryOnStore for MemoryTryOnStore {
    async fn put_upload(&self, record: &UploadRecord) -> Result<(), StoreError> {
        self.uploads.insert(record.upload_id.clone(), record.clone());
        Ok(())
    }

    async fn upload_payload(&self, upload_id: &str) -> Result<Option<EncodedImage>, StoreError> {
        Ok(self
            .uploads
            .get(upload_id)
            .map(|entry| entry.payload.clone()))
    }

    async fn insert_tryon(&self, record: &TryOnRecord) -> Result<(), StoreError> {
        self.tryons.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get_tryon(&self, id: &str) -> Result<Option<TryOnRecord>, StoreError> {
        Ok(self.tryons.get(id).map(|entry| entry.value().clone()))
    }

    async fn attach_feedback(
        &self,
        try_on_id: &str,
        feedback: &FeedbackRecord,
    ) -> Result<bool, StoreError> {
        match self.tryons.get_mut(try_on_id) {
            Some(mut entry) => {
                entry.feedback = Some(feedback.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn next_feedback_serial(&self) -> Result<u64, StoreError> {
        Ok(self.feedback_serial.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn list_feedback(&self) -> Result<Vec<FeedbackEntry>, StoreError> {
        Ok(self
            .tryons
            .iter()
            .filter_map(|entry| {
                entry.feedback.as_ref().map(|feedback| FeedbackEntry {
                    try_on_id: entry.key().clone(),
                    feedback: feedback.clone(),
                })
            })
            .collect())
    }

    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError> {
        self.status_checks.write().await.push(check.clone());
        Ok(())
    }

    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        let checks = self.status_checks.read().await;
        Ok(checks.iter().take(limit).cloned().collect())
    }
}
