//! Magic-byte classification of image payloads.
//!
//! Classification never fails. Bytes that match no known signature are
//! reported as JPEG: the generation model treats the mime type as a hint, so
//! an optimistic guess is preferred over rejecting the request.

use crate::blob::ImageFormat;

/// A signature is a predicate over the leading bytes plus the tag it implies.
type Signature = (fn(&[u8]) -> bool, ImageFormat);

/// Ordered signature table. The first matching entry wins.
const SIGNATURES: &[Signature] = &[
    (is_jpeg, ImageFormat::Jpeg),
    (is_png, ImageFormat::Png),
    (is_webp, ImageFormat::Webp),
    (is_gif, ImageFormat::Gif),
];

/// Format reported for bytes that match no signature.
pub const FALLBACK_FORMAT: ImageFormat = ImageFormat::Jpeg;

/// Classify an image by its magic-byte prefix, ignoring any declared type.
pub fn classify(bytes: &[u8]) -> ImageFormat {
    SIGNATURES
        .iter()
        .find(|(matches, _)| matches(bytes))
        .map_or(FALLBACK_FORMAT, |(_, format)| *format)
}

fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xFF, 0xD8, 0xFF])
}

fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0x89, b'P', b'N', b'G'])
}

fn is_webp(bytes: &[u8]) -> bool {
    bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP".as_slice())
}

fn is_gif(bytes: &[u8]) -> bool {
    bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a")
}
