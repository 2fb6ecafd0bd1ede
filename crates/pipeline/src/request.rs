use serde::{Deserialize, Serialize};

use tryon_core::{EncodedImage, ImageDecodeError, ImageRole};

use crate::error::TryOnError;

/// Where one side's image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Bytes supplied in the request body.
    Inline(EncodedImage),
    /// A token returned by an earlier upload.
    Upload(String),
}

/// A validated try-on request. Both sides use the same source kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnRequest {
    pub subject: ImageSource,
    pub garment: ImageSource,
}

impl TryOnRequest {
    pub fn inline(subject: EncodedImage, garment: EncodedImage) -> Self {
        Self {
            subject: ImageSource::Inline(subject),
            garment: ImageSource::Inline(garment),
        }
    }

    pub fn uploads(subject: impl Into<String>, garment: impl Into<String>) -> Self {
        Self {
            subject: ImageSource::Upload(subject.into()),
            garment: ImageSource::Upload(garment.into()),
        }
    }
}

/// Try-on request body as received on the wire.
///
/// Either both images are inline base64 or both are upload tokens. The
/// snake_case field names are accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TryOnPayload {
    /// Base64 photo of the person, optionally as a data URL.
    #[serde(default, alias = "personImage", alias = "person_image")]
    pub subject_image: Option<String>,
    /// Base64 photo of the clothing item, optionally as a data URL.
    #[serde(default, alias = "clothingImage", alias = "clothing_image")]
    pub garment_image: Option<String>,
    /// Upload token for the person photo.
    #[serde(default, alias = "personUploadId", alias = "person_upload_id")]
    pub subject_upload_id: Option<String>,
    /// Upload token for the clothing photo.
    #[serde(default, alias = "clothingUploadId", alias = "clothing_upload_id")]
    pub garment_upload_id: Option<String>,
}

/// One side of the payload after empty strings are dropped.
enum Side {
    Inline(String),
    Upload(String),
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn side(
    role: ImageRole,
    inline: Option<String>,
    upload: Option<String>,
) -> Result<Side, TryOnError> {
    match (present(inline), present(upload)) {
        (Some(_), Some(_)) => Err(TryOnError::InvalidRequest(format!(
            "{role} image given both inline and as an upload id"
        ))),
        (Some(inline), None) => Ok(Side::Inline(inline)),
        (None, Some(upload)) => Ok(Side::Upload(upload.trim().to_owned())),
        (None, None) => Err(TryOnError::InvalidRequest(format!("{role} image is missing"))),
    }
}

fn parse_inline(role: ImageRole, text: &str) -> Result<EncodedImage, TryOnError> {
    EncodedImage::parse(text).map_err(|e| match e {
        ImageDecodeError::Empty => TryOnError::InvalidRequest(format!("{role} image is empty")),
        ImageDecodeError::InvalidBase64(reason) => {
            TryOnError::InvalidRequest(format!("{role} image is not valid base64: {reason}"))
        }
    })
}

impl TryOnPayload {
    /// Validate the shape and decode inline images.
    pub fn into_request(self) -> Result<TryOnRequest, TryOnError> {
        let subject = side(ImageRole::Person, self.subject_image, self.subject_upload_id)?;
        let garment = side(ImageRole::Garment, self.garment_image, self.garment_upload_id)?;

        match (subject, garment) {
            (Side::Inline(subject), Side::Inline(garment)) => Ok(TryOnRequest::inline(
                parse_inline(ImageRole::Person, &subject)?,
                parse_inline(ImageRole::Garment, &garment)?,
            )),
            (Side::Upload(subject), Side::Upload(garment)) => {
                Ok(TryOnRequest::uploads(subject, garment))
            }
            _ => Err(TryOnError::InvalidRequest(
                "both images must be inline or both must be upload ids".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg==";

    fn invalid(payload: TryOnPayload) -> String {
        match payload.into_request() {
            Err(TryOnError::InvalidRequest(msg)) => msg,
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn both_inline() {
        let payload = TryOnPayload {
            subject_image: Some(PIXEL.into()),
            garment_image: Some(format!("data:image/png;base64,{PIXEL}")),
            ..TryOnPayload::default()
        };
        let request = payload.into_request().unwrap();
        let expected = EncodedImage::from_encoded(PIXEL);
        assert_eq!(request, TryOnRequest::inline(expected.clone(), expected));
    }

    #[test]
    fn both_uploads() {
        let payload = TryOnPayload {
            subject_upload_id: Some("u-1".into()),
            garment_upload_id: Some(" u-2 ".into()),
            ..TryOnPayload::default()
        };
        assert_eq!(
            payload.into_request().unwrap(),
            TryOnRequest::uploads("u-1", "u-2")
        );
    }

    #[test]
    fn empty_payload_is_invalid() {
        let msg = invalid(TryOnPayload::default());
        assert!(msg.contains("person"));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let payload = TryOnPayload {
            subject_image: Some(String::new()),
            garment_image: Some("  ".into()),
            subject_upload_id: Some("u-1".into()),
            garment_upload_id: Some("u-2".into()),
        };
        assert_eq!(
            payload.into_request().unwrap(),
            TryOnRequest::uploads("u-1", "u-2")
        );
    }

    #[test]
    fn mixed_shapes_are_invalid() {
        let msg = invalid(TryOnPayload {
            subject_image: Some(PIXEL.into()),
            garment_upload_id: Some("u-2".into()),
            ..TryOnPayload::default()
        });
        assert!(msg.contains("both"));
    }

    #[test]
    fn one_side_missing_is_invalid() {
        let msg = invalid(TryOnPayload {
            subject_image: Some(PIXEL.into()),
            ..TryOnPayload::default()
        });
        assert!(msg.contains("garment"));
    }

    #[test]
    fn side_with_both_forms_is_invalid() {
        let msg = invalid(TryOnPayload {
            subject_image: Some(PIXEL.into()),
            subject_upload_id: Some("u-1".into()),
            garment_image: Some(PIXEL.into()),
            ..TryOnPayload::default()
        });
        assert!(msg.contains("person"));
    }

    #[test]
    fn bad_base64_is_invalid() {
        let msg = invalid(TryOnPayload {
            subject_image: Some(PIXEL.into()),
            garment_image: Some("not*base64".into()),
            ..TryOnPayload::default()
        });
        assert!(msg.contains("garment"));
    }

    #[test]
    fn accepts_snake_case_aliases() {
        let payload: TryOnPayload = serde_json::from_value(serde_json::json!({
            "person_image": PIXEL,
            "clothing_image": PIXEL,
        }))
        .unwrap();
        assert!(payload.into_request().is_ok());

        let payload: TryOnPayload = serde_json::from_value(serde_json::json!({
            "subjectUploadId": "a",
            "garmentUploadId": "b",
        }))
        .unwrap();
        assert_eq!(payload.into_request().unwrap(), TryOnRequest::uploads("a", "b"));
    }
}
