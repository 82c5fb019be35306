//! Turning an uploaded image into a waste classification.
//!
//! The flow is decode, infer, resolve labels, pick the top prediction. Every
//! step is synchronous; the HTTP layer decides where it runs.

mod types;
mod waste;

pub use types::{DetectResponse, Detection, TopPrediction};
pub use waste::{KnownLabel, WasteType};

use crate::error::{Error, Result};
use crate::inference::{ClassNames, Detector, RawDetection};
use image::error::{DecodingError, ImageFormatHint};
use image::{ImageError, ImageFormat, RgbImage};
use tracing::debug;

/// JPEG end-of-image marker.
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Decode uploaded bytes as an image in any supported format, normalized to RGB.
///
/// Truncated JPEGs are rejected rather than decoded with the missing scan
/// data filled in.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    if bytes.is_empty() {
        return Err(Error::EmptyUpload);
    }

    if image::guess_format(bytes).ok() == Some(ImageFormat::Jpeg) && !ends_with_jpeg_eoi(bytes) {
        return Err(Error::ImageDecode {
            source: ImageError::Decoding(DecodingError::new(
                ImageFormatHint::Exact(ImageFormat::Jpeg),
                "image file is truncated",
            )),
        });
    }

    let image = image::load_from_memory(bytes).map_err(|e| Error::ImageDecode { source: e })?;
    debug!(
        "Decoded {}x{} image ({:?})",
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image.to_rgb8())
}

/// Whether the data ends with an EOI marker, ignoring trailing zero padding.
fn ends_with_jpeg_eoi(bytes: &[u8]) -> bool {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    bytes[..end].ends_with(&JPEG_EOI)
}

/// Name for a class id, falling back to `class_<id>`.
pub fn resolve_label(names: &ClassNames, class_id: usize) -> String {
    names
        .get(class_id)
        .map_or_else(|| format!("class_{class_id}"), str::to_string)
}

/// Attach labels to raw model detections, preserving order.
pub fn to_detections(raw: &[RawDetection], names: &ClassNames) -> Vec<Detection> {
    raw.iter()
        .map(|d| Detection {
            label: resolve_label(names, d.class_id),
            confidence: d.confidence,
            bounding_box: d.bbox,
        })
        .collect()
}

/// The highest-confidence detection; the earliest one wins ties.
pub fn select_top(detections: &[Detection]) -> Option<&Detection> {
    detections.iter().fold(None, |best, candidate| match best {
        Some(current) if current.confidence >= candidate.confidence => Some(current),
        _ => Some(candidate),
    })
}

/// Run the detector on a decoded image and shape the response.
pub fn classify_image(
    detector: &dyn Detector,
    image: &RgbImage,
    min_confidence: f32,
) -> Result<DetectResponse> {
    let raw = detector.infer(image, min_confidence)?;
    let detections = to_detections(&raw, detector.class_names());
    debug!("{} detection(s) at min confidence {}", detections.len(), min_confidence);
    Ok(DetectResponse::from_detections(detections))
}
