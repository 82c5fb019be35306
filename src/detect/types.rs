//! Response payload types for `/detect`.

use crate::detect::WasteType;
use crate::inference::BoundingBox;
use serde::{Deserialize, Serialize};

/// A single detected object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Model class name, or `class_<id>` when the model has no name for it.
    pub label: String,
    /// Detection confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Box in source image pixels.
    pub bounding_box: BoundingBox,
}

/// The highest-confidence detection with its waste category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPrediction {
    /// Model class name.
    pub label: String,
    /// Detection confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Resolved waste category.
    pub waste_type: WasteType,
}

impl TopPrediction {
    /// Derive from a detection, resolving its waste category.
    pub fn from_detection(detection: &Detection) -> Self {
        Self {
            label: detection.label.clone(),
            confidence: detection.confidence,
            waste_type: WasteType::for_label(&detection.label),
        }
    }
}

/// Full `/detect` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    /// Always `true` for a completed request.
    pub success: bool,
    /// Best detection, `null` when nothing was found.
    pub top_prediction: Option<TopPrediction>,
    /// All detections in model output order.
    pub detections: Vec<Detection>,
}

impl DetectResponse {
    /// Build a successful response, picking the top prediction from `detections`.
    pub fn from_detections(detections: Vec<Detection>) -> Self {
        let top_prediction = super::select_top(&detections).map(TopPrediction::from_detection);
        Self {
            success: true,
            top_prediction,
            detections,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_serializes_null_top_prediction() {
        let response = DetectResponse::from_detections(Vec::new());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "top_prediction": null, "detections": []})
        );
    }

    #[test]
    fn test_detection_field_names() {
        let detection = Detection {
            label: "bottle".to_string(),
            confidence: 0.5,
            bounding_box: BoundingBox {
                x1: 1.0,
                y1: 2.0,
                x2: 3.0,
                y2: 4.0,
            },
        };
        let json = serde_json::to_value(&detection).unwrap();
        assert_eq!(json["bounding_box"]["x1"], 1.0);
        assert_eq!(json["bounding_box"]["y2"], 4.0);
        assert_eq!(json["label"], "bottle");
    }
}
