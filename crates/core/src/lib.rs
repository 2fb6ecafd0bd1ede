//! Core types for the try-on service.
//!
//! This crate holds the value types shared by every other crate (image
//! blobs, records, aspect-ratio classes) together with the two pure stages
//! of the pipeline that need no I/O: format sniffing and aspect-ratio
//! negotiation.

pub mod blob;
pub mod error;
pub mod geometry;
pub mod record;
pub mod sniff;

pub use blob::{EncodedImage, ImageBlob, ImageFormat, ImageRole};
pub use error::ImageDecodeError;
pub use geometry::{AspectRatio, negotiate_aspect};
pub use record::{
    FeedbackEntry, FeedbackRecord, StatusCheck, TryOnRecord, TryOnStatus, UploadRecord,
};
pub use sniff::classify;
