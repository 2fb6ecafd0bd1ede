use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tryon_core::{ImageRole, UploadRecord};

/// Upload request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UploadPayload {
    /// Base64 image, optionally as a data URL.
    pub image: String,
    /// Side the image is meant for. Informational only.
    #[serde(default)]
    pub role: Option<ImageRole>,
}

/// Returned after an image is staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UploadReceipt {
    pub upload_id: String,
    pub timestamp: DateTime<Utc>,
    /// Always `"uploaded"`.
    pub status: String,
}

impl From<&UploadRecord> for UploadReceipt {
    fn from(record: &UploadRecord) -> Self {
        Self {
            upload_id: record.upload_id.clone(),
            timestamp: record.created_at,
            status: "uploaded".to_owned(),
        }
    }
}
