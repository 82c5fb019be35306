//! YOLOv8 detector backed by ONNX Runtime.

use crate::constants::{MAX_DETECTIONS, metadata, yolo::DEFAULT_INPUT_SIZE};
use crate::error::{Error, Result};
use crate::inference::postprocess::{DecodeOptions, anchor_count, postprocess};
use crate::inference::preprocess::letterbox;
use crate::inference::{ClassNames, Detector, RawDetection};
use image::RgbImage;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Load-time options for [`YoloDetector`].
#[derive(Debug, Clone)]
pub struct YoloOptions {
    /// IoU threshold for non-maximum suppression.
    pub iou_threshold: f32,
    /// Upper bound on detections per image.
    pub max_detections: usize,
    /// Class-name file overriding the model's embedded names.
    pub labels_path: Option<PathBuf>,
}

impl Default for YoloOptions {
    fn default() -> Self {
        Self {
            iou_threshold: crate::constants::DEFAULT_IOU_THRESHOLD,
            max_detections: MAX_DETECTIONS,
            labels_path: None,
        }
    }
}

/// Ultralytics YOLOv8 detection model exported to ONNX.
pub struct YoloDetector {
    // `Session::run` needs exclusive access.
    session: Mutex<Session>,
    names: ClassNames,
    input_width: u32,
    input_height: u32,
    iou_threshold: f32,
    max_detections: usize,
}

impl YoloDetector {
    /// Load a model from an ONNX file.
    ///
    /// Class names and input size are read from the exporter metadata when
    /// present.
    pub fn load(path: &Path, options: &YoloOptions) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ModelFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let session = Session::builder()
            .map_err(|e| Error::ModelLoad {
                reason: format!("failed to create session builder: {e}"),
            })?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::ModelLoad {
                reason: format!("failed to set optimization level: {e}"),
            })?
            .commit_from_file(path)
            .map_err(|e| Error::ModelLoad {
                reason: format!("failed to load '{}': {e}", path.display()),
            })?;

        let (embedded_names, input_size) = read_metadata(&session);

        let names = match &options.labels_path {
            Some(labels_path) => {
                info!("Loading class names: {}", labels_path.display());
                ClassNames::from_file(labels_path)?
            }
            None => embedded_names.unwrap_or_default(),
        };
        if names.is_empty() {
            warn!("Model has no class names; detections will be labelled class_<id>");
        }

        let (input_height, input_width) =
            input_size.unwrap_or((DEFAULT_INPUT_SIZE, DEFAULT_INPUT_SIZE));

        info!(
            "Loaded model: {} ({} classes, input {}x{})",
            path.display(),
            names.len(),
            input_width,
            input_height
        );

        Ok(Self {
            session: Mutex::new(session),
            names,
            input_width,
            input_height,
            iou_threshold: options.iou_threshold,
            max_detections: options.max_detections,
        })
    }

    /// Run the session on a prepared NCHW tensor and return the first output.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn run(&self, tensor: Vec<f32>) -> Result<(Vec<f32>, Vec<usize>)> {
        let shape = [
            1_usize,
            3,
            self.input_height as usize,
            self.input_width as usize,
        ];
        let input = Tensor::from_array((shape, tensor)).map_err(|e| Error::Inference {
            reason: format!("failed to create input tensor: {e}"),
        })?;

        let mut session = self.session.lock().map_err(|_| Error::Inference {
            reason: "model session lock poisoned".to_string(),
        })?;

        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let (_, output) = outputs.iter().next().ok_or_else(|| Error::Inference {
            reason: "model produced no outputs".to_string(),
        })?;

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Inference {
                reason: format!("failed to extract output: {e}"),
            })?;

        Ok((data.to_vec(), shape.iter().map(|&d| d as usize).collect()))
    }
}

impl Detector for YoloDetector {
    fn infer(&self, image: &RgbImage, min_confidence: f32) -> Result<Vec<RawDetection>> {
        let mut prepared = letterbox(image, self.input_width, self.input_height)?;
        let tensor = std::mem::take(&mut prepared.tensor);

        let (data, shape) = self.run(tensor)?;
        debug!("Model output shape: {:?}", shape);

        let detections = postprocess(
            &data,
            &shape,
            DecodeOptions {
                min_confidence,
                iou_threshold: self.iou_threshold,
                max_detections: self.max_detections,
                expected_anchors: Some(anchor_count(self.input_width, self.input_height)),
            },
        )?;

        Ok(detections
            .into_iter()
            .map(|d| RawDetection {
                bbox: prepared.restore(d.bbox),
                ..d
            })
            .collect())
    }

    fn class_names(&self) -> &ClassNames {
        &self.names
    }
}

impl std::fmt::Debug for YoloDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoloDetector")
            .field("num_classes", &self.names.len())
            .field("input_width", &self.input_width)
            .field("input_height", &self.input_height)
            .field("iou_threshold", &self.iou_threshold)
            .finish_non_exhaustive()
    }
}

/// Read class names and input size from the exporter's custom metadata.
fn read_metadata(session: &Session) -> (Option<ClassNames>, Option<(u32, u32)>) {
    let model_metadata = match session.metadata() {
        Ok(m) => m,
        Err(e) => {
            debug!("Model metadata unavailable: {e}");
            return (None, None);
        }
    };

    let names = model_metadata
        .custom(metadata::NAMES)
        .and_then(|value| ClassNames::from_metadata(&value));
    let input_size = model_metadata
        .custom(metadata::IMGSZ)
        .and_then(|value| parse_imgsz(&value));

    (names, input_size)
}

/// Parse an `imgsz` metadata value (`[640, 640]` or `640`) as `(height, width)`.
fn parse_imgsz(value: &str) -> Option<(u32, u32)> {
    let inner = value.trim().trim_start_matches('[').trim_end_matches(']');
    let dims: Vec<u32> = inner
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect::<Option<_>>()?;

    match dims.as_slice() {
        [side] if *side > 0 => Some((*side, *side)),
        [h, w] if *h > 0 && *w > 0 => Some((*h, *w)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_imgsz() {
        assert_eq!(parse_imgsz("[640, 640]"), Some((640, 640)));
        assert_eq!(parse_imgsz("[480, 640]"), Some((480, 640)));
        assert_eq!(parse_imgsz("320"), Some((320, 320)));
        assert_eq!(parse_imgsz("[0, 640]"), None);
        assert_eq!(parse_imgsz("square"), None);
    }

    #[test]
    fn test_load_missing_model_file() {
        let result = YoloDetector::load(
            Path::new("/nonexistent/best.onnx"),
            &YoloOptions::default(),
        );
        assert!(matches!(result, Err(Error::ModelFileNotFound { .. })));
    }
}
