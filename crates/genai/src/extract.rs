use tryon_core::{EncodedImage, ImageFormat};

use crate::error::ExtractError;
use crate::response::{InlinePayload, ModelResponse, Part};

/// Maximum characters of model text kept on a failed extraction.
const MODEL_TEXT_LIMIT: usize = 200;

/// An image pulled out of a model response.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedImage {
    pub image: EncodedImage,
    /// Format from the part's declared mime type. `Unknown` when the model
    /// declared nothing or something unrecognised.
    pub format: ImageFormat,
}

/// Return the first inline image in the response, in canonical base64 form.
///
/// Raw bytes are encoded; base64 payloads pass through unchanged. Inline
/// parts with an empty payload are skipped.
pub fn extract(response: &ModelResponse) -> Result<ExtractedImage, ExtractError> {
    response
        .parts
        .iter()
        .find_map(|part| match part {
            Part::InlineData { mime_type, data } if !data.is_empty() => Some(ExtractedImage {
                image: match data {
                    InlinePayload::Base64(text) => EncodedImage::from_encoded(text.clone()),
                    InlinePayload::Raw(bytes) => EncodedImage::from_bytes(bytes),
                },
                format: mime_type
                    .as_deref()
                    .map_or(ImageFormat::Unknown, ImageFormat::from_mime_type),
            }),
            _ => None,
        })
        .ok_or_else(|| ExtractError::NoImageProduced {
            model_text: response
                .text_content()
                .chars()
                .take(MODEL_TEXT_LIMIT)
                .collect(),
        })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn inline(data: InlinePayload) -> Part {
        Part::InlineData {
            mime_type: Some("image/png".into()),
            data,
        }
    }

    #[test]
    fn base64_payload_passes_through() {
        let response = ModelResponse::image("image/png", "iVBORw0KGgo=");
        assert_eq!(extract(&response).unwrap().image.as_str(), "iVBORw0KGgo=");
    }

    #[test]
    fn raw_payload_is_encoded() {
        let response = ModelResponse::new(vec![inline(InlinePayload::Raw(Bytes::from_static(
            b"\x89PNG",
        )))]);
        assert_eq!(extract(&response).unwrap().image.as_str(), "iVBORw==");
    }

    #[test]
    fn first_binary_part_wins_among_mixed_parts() {
        let response = ModelResponse::new(vec![
            Part::Text("Here is the outfit".into()),
            inline(InlinePayload::Base64(String::new())),
            inline(InlinePayload::Base64("Zmlyc3Q=".into())),
            Part::Text("and another".into()),
            inline(InlinePayload::Base64("c2Vjb25k".into())),
        ]);
        assert_eq!(extract(&response).unwrap().image.as_str(), "Zmlyc3Q=");
    }

    #[test]
    fn declared_mime_type_tags_the_result() {
        let response = ModelResponse::image("image/png", "iVBORw0KGgo=");
        assert_eq!(extract(&response).unwrap().format, ImageFormat::Png);

        let response = ModelResponse::image("application/octet-stream", "iVBORw0KGgo=");
        assert_eq!(extract(&response).unwrap().format, ImageFormat::Unknown);

        let response = ModelResponse::new(vec![Part::InlineData {
            mime_type: None,
            data: InlinePayload::Base64("iVBORw0KGgo=".into()),
        }]);
        assert_eq!(extract(&response).unwrap().format, ImageFormat::Unknown);
    }

    #[test]
    fn text_only_response_yields_no_image() {
        let response = ModelResponse::text("I can't help with that.");
        let err = extract(&response).unwrap_err();
        assert_eq!(
            err,
            ExtractError::NoImageProduced {
                model_text: "I can't help with that.".into()
            }
        );
    }

    #[test]
    fn empty_response_yields_no_image() {
        let err = extract(&ModelResponse::default()).unwrap_err();
        assert_eq!(
            err,
            ExtractError::NoImageProduced {
                model_text: String::new()
            }
        );
    }

    #[test]
    fn model_text_is_truncated() {
        let response = ModelResponse::text("x".repeat(1000));
        let ExtractError::NoImageProduced { model_text } = extract(&response).unwrap_err();
        assert_eq!(model_text.len(), MODEL_TEXT_LIMIT);
    }
}
