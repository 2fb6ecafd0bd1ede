use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::ImageDecodeError;
use crate::sniff::classify;

/// Encoding format of an image, as derived from its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
    Gif,
    Unknown,
}

impl ImageFormat {
    /// Mime type hint passed to the generation model.
    ///
    /// The hint is advisory, so `Unknown` is sent as JPEG.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg | Self::Unknown => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Map a declared mime type back to a format tag.
    pub fn from_mime_type(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Self::Jpeg,
            "image/png" => Self::Png,
            "image/webp" => Self::Webp,
            "image/gif" => Self::Gif,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a try-on an image plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ImageRole {
    /// The photograph of the person whose identity, pose and background are kept.
    Person,
    /// The photograph supplying the clothing or accessory.
    Garment,
}

impl ImageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Garment => "garment",
        }
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw image bytes with the format tag derived from them.
///
/// The only constructor sniffs the bytes, so the tag always agrees with the
/// payload. Blobs are never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    data: Bytes,
    format: ImageFormat,
}

impl ImageBlob {
    /// Wrap raw bytes, classifying them by magic prefix.
    pub fn sniff(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let format = classify(&data);
        Self { data, format }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Re-encode to the canonical text-safe form.
    pub fn encode(&self) -> EncodedImage {
        EncodedImage::from_bytes(&self.data)
    }
}

/// An image in canonical text-safe form: standard base64 without any
/// data-URL prefix.
///
/// This is the form used in persisted records and on the wire.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Encode raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(STANDARD.encode(data))
    }

    /// Adopt a payload that is already base64, without re-encoding it.
    ///
    /// Used where an upstream already produced the text-safe form and the
    /// payload must be passed through unchanged.
    pub fn from_encoded(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Parse caller-supplied text.
    ///
    /// Accepts an optional `data:<mime>;base64,` prefix and surrounding
    /// whitespace, and checks that the remainder decodes.
    pub fn parse(text: &str) -> Result<Self, ImageDecodeError> {
        let body = strip_data_url(text.trim());
        if body.is_empty() {
            return Err(ImageDecodeError::Empty);
        }
        STANDARD
            .decode(body)
            .map_err(|e| ImageDecodeError::InvalidBase64(e.to_string()))?;
        Ok(Self(body.to_owned()))
    }

    /// Decode back into raw bytes.
    pub fn decode(&self) -> Result<Bytes, ImageDecodeError> {
        if self.0.is_empty() {
            return Err(ImageDecodeError::Empty);
        }
        STANDARD
            .decode(self.0.as_bytes())
            .map(Bytes::from)
            .map_err(|e| ImageDecodeError::InvalidBase64(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the encoded text, in characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Images are large; keep them out of debug output.
impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedImage({} chars)", self.0.len())
    }
}

fn strip_data_url(text: &str) -> &str {
    if text.starts_with("data:")
        && let Some((_, body)) = text.split_once(";base64,")
    {
        return body;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg==";

    #[test]
    fn sniffed_blob_carries_format() {
        let blob = ImageBlob::sniff(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A]);
        assert_eq!(blob.format(), ImageFormat::Png);
        assert_eq!(blob.len(), 6);
    }

    #[test]
    fn parse_accepts_plain_base64() {
        let image = EncodedImage::parse(PNG_1X1).unwrap();
        assert_eq!(image.as_str(), PNG_1X1);
        let bytes = image.decode().unwrap();
        assert_eq!(ImageBlob::sniff(bytes).format(), ImageFormat::Png);
    }

    #[test]
    fn parse_strips_data_url_prefix() {
        let text = format!("data:image/png;base64,{PNG_1X1}");
        let image = EncodedImage::parse(&text).unwrap();
        assert_eq!(image.as_str(), PNG_1X1);
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert_eq!(EncodedImage::parse("  "), Err(ImageDecodeError::Empty));
        assert_eq!(
            EncodedImage::parse("data:image/png;base64,"),
            Err(ImageDecodeError::Empty)
        );
        assert!(matches!(
            EncodedImage::parse("invalid_base64!!"),
            Err(ImageDecodeError::InvalidBase64(_))
        ));
    }

    #[test]
    fn blob_encode_matches_standard_engine() {
        let blob = ImageBlob::sniff(b"GIF89a-rest".to_vec());
        assert_eq!(blob.encode().as_str(), STANDARD.encode(b"GIF89a-rest"));
    }

    #[test]
    fn debug_hides_payload() {
        let image = EncodedImage::from_encoded(PNG_1X1);
        let debug = format!("{image:?}");
        assert!(!debug.contains(PNG_1X1));
        assert!(debug.contains("chars"));
    }

    #[test]
    fn mime_type_round_trip() {
        for format in [
            ImageFormat::Jpeg,
            ImageFormat::Png,
            ImageFormat::Webp,
            ImageFormat::Gif,
        ] {
            assert_eq!(ImageFormat::from_mime_type(format.mime_type()), format);
        }
        assert_eq!(ImageFormat::Unknown.mime_type(), "image/jpeg");
        assert_eq!(
            ImageFormat::from_mime_type("application/octet-stream"),
            ImageFormat::Unknown
        );
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ImageRole::Garment).unwrap(),
            "\"garment\""
        );
        assert_eq!(ImageRole::Person.to_string(), "person");
    }
}
