//! Inference module for waste object detection.

mod host;
pub mod labels;
pub mod postprocess;
pub mod preprocess;
mod yolo;

pub use host::ModelHost;
pub use labels::ClassNames;
pub use yolo::{YoloDetector, YoloOptions};

use crate::error::Result;
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in absolute pixel coordinates (top-left, bottom-right).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl BoundingBox {
    /// Build a box from two corners in any order.
    pub fn from_corners(ax: f32, ay: f32, bx: f32, by: f32) -> Self {
        Self {
            x1: ax.min(bx),
            y1: ay.min(by),
            x2: ax.max(bx),
            y2: ay.max(by),
        }
    }

    /// Box area, zero for degenerate boxes.
    pub fn area(&self) -> f32 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }

    /// Intersection over union with another box.
    pub fn iou(&self, other: &Self) -> f32 {
        let w = (self.x2.min(other.x2) - self.x1.max(other.x1)).max(0.0);
        let h = (self.y2.min(other.y2) - self.y1.max(other.y1)).max(0.0);
        let intersection = w * h;
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 { 0.0 } else { intersection / union }
    }

    /// Clamp the box inside a `width` x `height` image.
    pub fn clip(self, width: f32, height: f32) -> Self {
        Self {
            x1: self.x1.clamp(0.0, width),
            y1: self.y1.clamp(0.0, height),
            x2: self.x2.clamp(0.0, width),
            y2: self.y2.clamp(0.0, height),
        }
    }
}

/// One detection as emitted by the model, before label resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawDetection {
    /// Model class index.
    pub class_id: usize,
    /// Detection confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Box in original image pixels.
    pub bbox: BoundingBox,
}

/// An object detector that can be shared across request handlers.
///
/// Implementations must return detections at or above `min_confidence`, in a
/// deterministic order for a given input.
pub trait Detector: Send + Sync {
    /// Run detection on a decoded RGB image.
    fn infer(&self, image: &RgbImage, min_confidence: f32) -> Result<Vec<RawDetection>>;

    /// Class id to name table.
    fn class_names(&self) -> &ClassNames;
}
