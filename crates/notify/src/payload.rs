use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use tryon_core::{EncodedImage, TryOnRecord};

/// Which image of the try-on triple an entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Person,
    Clothing,
    Result,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationImage {
    #[serde(rename = "type")]
    pub kind: ImageKind,
    pub data: EncodedImage,
}

/// Body posted to the notification sink for one completed try-on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub try_on_id: String,
    #[serde(serialize_with = "rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub images: Vec<NotificationImage>,
}

impl NotificationPayload {
    /// Build the payload for a persisted record: person, clothing, result.
    pub fn from_record(record: &TryOnRecord) -> Self {
        Self {
            try_on_id: record.id.clone(),
            timestamp: record.created_at,
            images: vec![
                NotificationImage {
                    kind: ImageKind::Person,
                    data: record.subject_image.clone(),
                },
                NotificationImage {
                    kind: ImageKind::Clothing,
                    data: record.garment_image.clone(),
                },
                NotificationImage {
                    kind: ImageKind::Result,
                    data: record.result_image.clone(),
                },
            ],
        }
    }
}

fn rfc3339<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shape() {
        let record = TryOnRecord::completed(
            EncodedImage::from_bytes(b"p"),
            EncodedImage::from_bytes(b"c"),
            EncodedImage::from_bytes(b"r"),
        );
        let payload = NotificationPayload::from_record(&record);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["tryOnId"], record.id.as_str());
        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(timestamp.ends_with('Z'));

        let images = json["images"].as_array().unwrap();
        let kinds: Vec<_> = images.iter().map(|i| i["type"].as_str().unwrap()).collect();
        assert_eq!(kinds, ["person", "clothing", "result"]);
        assert_eq!(images[0]["data"], "cA==");
        assert_eq!(images[2]["data"], "cg==");
    }
}
