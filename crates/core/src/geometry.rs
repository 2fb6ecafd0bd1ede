use std::fmt;
use std::io::Cursor;

use image::ImageReader;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Output canvas shapes accepted by the generation model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait3x4,
    #[serde(rename = "4:3")]
    Landscape4x3,
    #[serde(rename = "9:16")]
    Portrait9x16,
    #[serde(rename = "16:9")]
    Landscape16x9,
}

impl AspectRatio {
    /// All classes in negotiation order. Ties resolve to the earlier entry.
    pub const ALL: [Self; 5] = [
        Self::Square,
        Self::Portrait3x4,
        Self::Landscape4x3,
        Self::Portrait9x16,
        Self::Landscape16x9,
    ];

    /// Width over height for this class.
    pub fn value(self) -> f64 {
        match self {
            Self::Square => 1.0,
            Self::Portrait3x4 => 0.75,
            Self::Landscape4x3 => 1.333,
            Self::Portrait9x16 => 0.5625,
            Self::Landscape16x9 => 1.777,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait3x4 => "3:4",
            Self::Landscape4x3 => "4:3",
            Self::Portrait9x16 => "9:16",
            Self::Landscape16x9 => "16:9",
        }
    }

    /// The class whose ratio is closest to `ratio` by absolute difference.
    pub fn nearest(ratio: f64) -> Self {
        let mut best = Self::ALL[0];
        let mut best_delta = (best.value() - ratio).abs();
        for candidate in &Self::ALL[1..] {
            let delta = (candidate.value() - ratio).abs();
            if delta < best_delta {
                best = *candidate;
                best_delta = delta;
            }
        }
        best
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the output aspect class for a subject image.
///
/// Only the image header is read. Anything that cannot be probed (corrupt
/// bytes, unsupported container, zero-sized image) yields `1:1`; this stage
/// never fails the request.
pub fn negotiate_aspect(image_bytes: &[u8]) -> AspectRatio {
    match probe_dimensions(image_bytes) {
        Some((width, height)) => {
            let ratio = f64::from(width) / f64::from(height);
            let aspect = AspectRatio::nearest(ratio);
            debug!(width, height, ratio, aspect = %aspect, "negotiated aspect ratio");
            aspect
        }
        None => AspectRatio::default(),
    }
}

fn probe_dimensions(image_bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(image_bytes))
        .with_guessed_format()
        .ok()?;
    match reader.into_dimensions() {
        Ok((width, height)) if width > 0 && height > 0 => Some((width, height)),
        Ok((width, height)) => {
            debug!(width, height, "degenerate image dimensions, using 1:1");
            None
        }
        Err(e) => {
            debug!(error = %e, "could not read image dimensions, using 1:1");
            None
        }
    }
}
