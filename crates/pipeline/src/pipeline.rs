use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use tryon_core::{
    EncodedImage, FeedbackRecord, ImageBlob, ImageDecodeError, ImageRole, StatusCheck,
    TryOnRecord, TryOnStatus, UploadRecord, negotiate_aspect,
};
use tryon_genai::{GenerationClient, GenerationVariant, compose, extract};
use tryon_notify::{NotificationDispatcher, NotificationPayload};
use tryon_store::TryOnStore;

use crate::builder::PipelineBuilder;
use crate::error::TryOnError;
use crate::feedback::{FeedbackReceipt, FeedbackSubmission, FeedbackSummary, summarize};
use crate::metrics::{MetricsSnapshot, PipelineMetrics};
use crate::request::{TryOnPayload, TryOnRequest};
use crate::resolve::resolve;
use crate::stage::PipelineStage;
use crate::upload::UploadReceipt;

/// Accepted star ratings.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// What a caller gets back for a completed try-on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TryOnOutcome {
    pub id: String,
    pub result_image: EncodedImage,
    pub timestamp: DateTime<Utc>,
    pub status: TryOnStatus,
}

impl From<&TryOnRecord> for TryOnOutcome {
    fn from(record: &TryOnRecord) -> Self {
        Self {
            id: record.id.clone(),
            result_image: record.result_image.clone(),
            timestamp: record.created_at,
            status: record.status,
        }
    }
}

/// Orchestrates try-on requests and the operations around them.
///
/// The pipeline holds only injected handles and counters; cloning it is
/// cheap and clones share the same store, client and metrics.
#[derive(Clone)]
pub struct TryOnPipeline {
    pub(crate) store: Arc<dyn TryOnStore>,
    pub(crate) client: Arc<dyn GenerationClient>,
    pub(crate) variant: GenerationVariant,
    pub(crate) dispatcher: Option<NotificationDispatcher>,
    pub(crate) metrics: Arc<PipelineMetrics>,
}

impl std::fmt::Debug for TryOnPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryOnPipeline")
            .field("variant", &self.variant.name)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl TryOnPipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn variant(&self) -> &GenerationVariant {
        &self.variant
    }

    pub fn notifications_enabled(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// Run one try-on from request to persisted record.
    ///
    /// Each stage runs once, in order. The record is written before this
    /// returns; notification is scheduled afterwards and never affects the
    /// result.
    #[instrument(name = "pipeline.run", skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn run(&self, request: TryOnRequest) -> Result<TryOnOutcome, TryOnError> {
        self.metrics.increment_requests();
        let mut stage = PipelineStage::Resolving;

        match self.execute(&request, &mut stage).await {
            Ok(record) => {
                self.metrics.increment_completed();
                if let Some(dispatcher) = &self.dispatcher {
                    dispatcher.dispatch(NotificationPayload::from_record(&record));
                }
                info!(try_on_id = %record.id, "try-on completed");
                Ok(TryOnOutcome::from(&record))
            }
            Err(e) => {
                self.metrics.record_failure(&e);
                if let TryOnError::NoImageProduced { model_text } = &e {
                    warn!(%stage, %model_text, "model returned no image");
                } else {
                    warn!(%stage, kind = e.kind(), error = %e, "try-on failed");
                }
                debug!(stage = %PipelineStage::Failed, "entering stage");
                Err(e)
            }
        }
    }

    /// Validate a wire payload, then [`run`](Self::run) it.
    ///
    /// A payload rejected here still counts as a request and as an
    /// `invalid_request` failure.
    pub async fn run_payload(&self, payload: TryOnPayload) -> Result<TryOnOutcome, TryOnError> {
        match payload.into_request() {
            Ok(request) => self.run(request).await,
            Err(e) => {
                self.metrics.increment_requests();
                self.metrics.record_failure(&e);
                warn!(kind = e.kind(), error = %e, "rejected try-on payload");
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        request: &TryOnRequest,
        stage: &mut PipelineStage,
    ) -> Result<TryOnRecord, TryOnError> {
        debug!(%stage, "entering stage");
        let resolved = resolve(self.store.as_ref(), request).await?;

        advance(stage);
        let subject = ImageBlob::sniff(resolved.subject);
        let garment = ImageBlob::sniff(resolved.garment);
        debug!(
            subject_format = %subject.format(),
            subject_bytes = subject.len(),
            garment_format = %garment.format(),
            garment_bytes = garment.len(),
            "sniffed inputs"
        );

        advance(stage);
        let aspect = negotiate_aspect(subject.data());

        advance(stage);
        let generation = compose(&self.variant, &subject, &garment, aspect);

        advance(stage);
        let response = self.client.generate(&generation).await?;

        advance(stage);
        let extracted = extract(&response)?;
        debug!(result_format = %extracted.format, "extracted result image");
        let result_image = extracted.image;

        advance(stage);
        let record = TryOnRecord::completed(subject.encode(), garment.encode(), result_image);
        self.store.insert_tryon(&record).await?;

        advance(stage);
        Ok(record)
    }

    /// Stage an image for later use by token.
    #[instrument(name = "pipeline.stage_upload", skip(self, image))]
    pub async fn stage_upload(
        &self,
        image: &str,
        role: Option<ImageRole>,
    ) -> Result<UploadReceipt, TryOnError> {
        let payload = EncodedImage::parse(image).map_err(|e| match e {
            ImageDecodeError::Empty => TryOnError::InvalidRequest("image is empty".into()),
            ImageDecodeError::InvalidBase64(reason) => {
                TryOnError::InvalidRequest(format!("image is not valid base64: {reason}"))
            }
        })?;

        let record = UploadRecord::new(payload, role);
        self.store.put_upload(&record).await?;
        self.metrics.increment_uploads();
        debug!(upload_id = %record.upload_id, "image staged");
        Ok(UploadReceipt::from(&record))
    }

    /// Fetch a persisted try-on.
    pub async fn get_tryon(&self, id: &str) -> Result<TryOnRecord, TryOnError> {
        self.store
            .get_tryon(id)
            .await?
            .ok_or_else(|| TryOnError::TryOnNotFound(id.to_owned()))
    }

    /// Attach customer feedback to an existing try-on.
    ///
    /// Feedback left on a try-on that already has some replaces it and takes
    /// a fresh serial number.
    #[instrument(name = "pipeline.submit_feedback", skip_all, fields(try_on_id = %submission.try_on_id))]
    pub async fn submit_feedback(
        &self,
        submission: FeedbackSubmission,
    ) -> Result<FeedbackReceipt, TryOnError> {
        let try_on_id = submission.try_on_id.trim();
        if try_on_id.is_empty() {
            return Err(TryOnError::InvalidRequest("try-on id is missing".into()));
        }
        if !RATING_RANGE.contains(&submission.rating) {
            return Err(TryOnError::InvalidRequest(format!(
                "rating must be between 1 and 5, got {}",
                submission.rating
            )));
        }
        if self.store.get_tryon(try_on_id).await?.is_none() {
            return Err(TryOnError::TryOnNotFound(try_on_id.to_owned()));
        }

        let serial_number = self.store.next_feedback_serial().await?;
        let feedback = FeedbackRecord {
            serial_number,
            rating: submission.rating,
            comment: non_blank(submission.comment),
            customer_name: non_blank(submission.customer_name),
            submitted_at: Utc::now(),
        };
        if !self.store.attach_feedback(try_on_id, &feedback).await? {
            return Err(TryOnError::TryOnNotFound(try_on_id.to_owned()));
        }

        self.metrics.increment_feedback();
        info!(serial_number, rating = feedback.rating, "feedback recorded");
        Ok(FeedbackReceipt {
            success: true,
            serial_number,
        })
    }

    /// All feedback, newest first, with per-day statistics.
    pub async fn feedback_summary(&self) -> Result<FeedbackSummary, TryOnError> {
        Ok(summarize(self.store.list_feedback().await?))
    }

    /// Record a client liveness ping.
    pub async fn record_status_check(&self, client_name: &str) -> Result<StatusCheck, TryOnError> {
        let client_name = client_name.trim();
        if client_name.is_empty() {
            return Err(TryOnError::InvalidRequest("client name is missing".into()));
        }
        let check = StatusCheck::new(client_name);
        self.store.insert_status_check(&check).await?;
        Ok(check)
    }

    /// The first `limit` status checks in insertion order.
    pub async fn status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, TryOnError> {
        Ok(self.store.list_status_checks(limit).await?)
    }

    /// Point-in-time counters, including notification outcomes.
    pub fn metrics(&self) -> MetricsSnapshot {
        let mut snapshot = self.metrics.snapshot();
        if let Some(dispatcher) = &self.dispatcher {
            let stats = dispatcher.stats();
            snapshot.notifications_dispatched = stats.dispatched;
            snapshot.notifications_delivered = stats.delivered;
            snapshot.notifications_failed = stats.failed;
            snapshot.notifications_timed_out = stats.timed_out;
        }
        snapshot
    }

    /// Stop accepting notification work and wait for in-flight attempts.
    pub async fn shutdown(&self) {
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.shutdown().await;
        }
        info!("pipeline shutdown complete");
    }
}

fn advance(stage: &mut PipelineStage) {
    if let Some(next) = stage.next() {
        *stage = next;
        debug!(%stage, "entering stage");
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
