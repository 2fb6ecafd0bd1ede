use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blob::{EncodedImage, ImageRole};

/// A staged image, redeemable later by its `upload_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UploadRecord {
    /// Opaque token handed back to the caller.
    pub upload_id: String,
    /// Side the caller declared for this upload, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ImageRole>,
    /// The staged image.
    pub payload: EncodedImage,
    pub created_at: DateTime<Utc>,
}

impl UploadRecord {
    /// Create a record with a fresh token and the current time.
    pub fn new(payload: EncodedImage, role: Option<ImageRole>) -> Self {
        Self {
            upload_id: Uuid::new_v4().to_string(),
            role,
            payload,
            created_at: Utc::now(),
        }
    }
}

/// Lifecycle state of a persisted try-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum TryOnStatus {
    Completed,
    Failed,
}

impl TryOnStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Customer feedback attached to a try-on after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeedbackRecord {
    /// Position of this feedback across the whole record set, starting at 1.
    pub serial_number: u64,
    /// Star rating, 1 to 5.
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Feedback paired with the try-on it was left on, without the images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeedbackEntry {
    pub try_on_id: String,
    pub feedback: FeedbackRecord,
}

/// The durable result of one successful pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TryOnRecord {
    pub id: String,
    pub subject_image: EncodedImage,
    pub garment_image: EncodedImage,
    pub result_image: EncodedImage,
    pub created_at: DateTime<Utc>,
    pub status: TryOnStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackRecord>,
}

impl TryOnRecord {
    /// Build a completed record with a fresh identifier.
    pub fn completed(
        subject_image: EncodedImage,
        garment_image: EncodedImage,
        result_image: EncodedImage,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            subject_image,
            garment_image,
            result_image,
            created_at: Utc::now(),
            status: TryOnStatus::Completed,
            feedback: None,
        }
    }
}

/// A client liveness ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_records_get_distinct_ids() {
        let img = EncodedImage::from_bytes(b"x");
        let a = TryOnRecord::completed(img.clone(), img.clone(), img.clone());
        let b = TryOnRecord::completed(img.clone(), img.clone(), img);
        assert_ne!(a.id, b.id);
        assert_eq!(a.status, TryOnStatus::Completed);
        assert!(a.feedback.is_none());
    }

    #[test]
    fn record_json_omits_missing_feedback() {
        let img = EncodedImage::from_bytes(b"x");
        let record = TryOnRecord::completed(img.clone(), img.clone(), img);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["result_image"], "eA==");
        assert!(json.get("feedback").is_none());

        let back: TryOnRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn upload_record_keeps_optional_role() {
        let record = UploadRecord::new(EncodedImage::from_bytes(b"y"), Some(ImageRole::Garment));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["role"], "garment");

        let anonymous = UploadRecord::new(EncodedImage::from_bytes(b"y"), None);
        let json = serde_json::to_value(&anonymous).unwrap();
        assert!(json.get("role").is_none());
    }
}
