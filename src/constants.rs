//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "waste-classifier";

/// Default model weights location, relative to the deployment root.
pub const DEFAULT_MODEL_PATH: &str = "yolov8/runs/detect/train3/weights/best.onnx";

/// Default minimum confidence threshold for detections.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.25;

/// Default IoU threshold for non-maximum suppression.
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.7;

/// Maximum number of detections kept per image after suppression.
pub const MAX_DETECTIONS: usize = 300;

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default request body limit for uploads (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Multipart part name carrying the uploaded image.
pub const UPLOAD_FIELD: &str = "file";

/// Environment variable names read at startup.
pub mod env {
    /// Path to the model weights.
    pub const MODEL_PATH: &str = "MODEL_PATH";
    /// Minimum detection confidence.
    pub const MIN_CONFIDENCE: &str = "MIN_CONFIDENCE";
    /// Comma-separated CORS allow-list.
    pub const ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
    /// Optional class-name file.
    pub const LABELS_PATH: &str = "LABELS_PATH";
    /// Bind host.
    pub const HOST: &str = "HOST";
    /// Bind port.
    pub const PORT: &str = "PORT";
    /// Explicit config file path.
    pub const CONFIG: &str = "WASTE_CLASSIFIER_CONFIG";
}

/// YOLO input preprocessing constants.
pub mod yolo {
    /// Default square input edge when the model carries no `imgsz` metadata.
    pub const DEFAULT_INPUT_SIZE: u32 = 640;
    /// Letterbox padding gray level.
    pub const PAD_VALUE: u8 = 114;
    /// Number of box coordinates preceding class scores in each prediction row.
    pub const BOX_COORDS: usize = 4;
    /// Detection head strides; each contributes `(w / s) * (h / s)` anchors.
    pub const STRIDES: [u32; 3] = [8, 16, 32];
}

/// ONNX metadata keys written by the Ultralytics exporter.
pub mod metadata {
    /// Class id to name dictionary.
    pub const NAMES: &str = "names";
    /// Input image size.
    pub const IMGSZ: &str = "imgsz";
}
