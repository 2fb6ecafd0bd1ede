use async_trait::async_trait;

use tryon_core::{
    EncodedImage, FeedbackEntry, FeedbackRecord, StatusCheck, TryOnRecord, UploadRecord,
};

use crate::error::StoreError;

/// Trait for persisting try-on state.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// Records are written whole; the only in-place mutation is attaching
/// feedback to an existing try-on.
#[async_trait]
pub trait TryOnStore: Send + Sync {
    /// Stage an uploaded image under its `upload_id`.
    async fn put_upload(&self, record: &UploadRecord) -> Result<(), StoreError>;

    /// Fetch only the image payload of a staged upload.
    /// Returns `None` if the token is unknown.
    async fn upload_payload(&self, upload_id: &str) -> Result<Option<EncodedImage>, StoreError>;

    /// Persist a completed try-on, overwriting any record with the same id.
    async fn insert_tryon(&self, record: &TryOnRecord) -> Result<(), StoreError>;

    /// Get a try-on by id. Returns `None` if not found.
    async fn get_tryon(&self, id: &str) -> Result<Option<TryOnRecord>, StoreError>;

    /// Attach feedback to a try-on, replacing any earlier feedback.
    /// Returns `false` if the try-on does not exist.
    async fn attach_feedback(
        &self,
        try_on_id: &str,
        feedback: &FeedbackRecord,
    ) -> Result<bool, StoreError>;

    /// Atomically allocate the next feedback serial number.
    ///
    /// The first call on an empty store returns 1 and every later call
    /// returns a strictly larger value, even under concurrent callers.
    async fn next_feedback_serial(&self) -> Result<u64, StoreError>;

    /// All try-ons that carry feedback. Order is unspecified.
    async fn list_feedback(&self) -> Result<Vec<FeedbackEntry>, StoreError>;

    /// Record a client status ping.
    async fn insert_status_check(&self, check: &StatusCheck) -> Result<(), StoreError>;

    /// Status pings in insertion order, at most `limit` of them.
    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError>;
}
