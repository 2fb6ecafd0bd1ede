//! Request orchestration for the try-on service.
//!
//! A [`TryOnPipeline`] runs each request through a fixed sequence of
//! [`PipelineStage`]s: resolve both inputs, sniff their formats, negotiate the
//! output aspect ratio, compose and send the generation request, extract the
//! result image, persist the record and hand it to the notification
//! dispatcher. Every dependency is injected through [`PipelineBuilder`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tryon_genai::{GeminiClient, GeminiConfig, GenerationVariant};
//! use tryon_pipeline::TryOnPipeline;
//! use tryon_store_memory::MemoryTryOnStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(GeminiConfig::new("api-key"))?;
//! let pipeline = TryOnPipeline::builder()
//!     .store(Arc::new(MemoryTryOnStore::new()))
//!     .client(Arc::new(client))
//!     .variant(GenerationVariant::flash_image())
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod feedback;
pub mod metrics;
pub mod pipeline;
pub mod request;
pub mod resolve;
pub mod stage;
pub mod upload;

pub use builder::PipelineBuilder;
pub use error::{BuildError, TryOnError};
pub use feedback::{
    DailyStat, FeedbackItem, FeedbackReceipt, FeedbackSubmission, FeedbackSummary, summarize,
};
pub use metrics::{MetricsSnapshot, PipelineMetrics};
pub use pipeline::{RATING_RANGE, TryOnOutcome, TryOnPipeline};
pub use request::{ImageSource, TryOnPayload, TryOnRequest};
pub use resolve::{ResolvedImages, resolve};
pub use stage::PipelineStage;
pub use upload::{UploadPayload, UploadReceipt};
