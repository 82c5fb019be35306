//! Configuration type definitions.

use crate::constants::{
    DEFAULT_HOST, DEFAULT_IOU_THRESHOLD, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MIN_CONFIDENCE,
    DEFAULT_PORT,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file-based configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Detection model settings.
    #[serde(default)]
    pub model: ModelConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Origins allowed to make cross-origin requests. Empty means any.
    pub allowed_origins: Vec<String>,

    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: Vec::new(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Detection model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the ONNX weights.
    pub path: Option<PathBuf>,

    /// Optional class-name file, one name per line.
    pub labels: Option<PathBuf>,

    /// Minimum confidence threshold.
    pub min_confidence: f32,

    /// IoU threshold for non-maximum suppression.
    pub iou_threshold: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            labels: None,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            iou_threshold: DEFAULT_IOU_THRESHOLD,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_default_values() {
        let model = ModelConfig::default();
        assert_eq!(model.min_confidence, 0.25);
        assert_eq!(model.iou_threshold, 0.7);
        assert!(model.path.is_none());
    }

    #[test]
    fn test_server_config_default_values() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 8000);
        assert!(server.allowed_origins.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[server]\nport = 9000\n").unwrap_or_default();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.model.min_confidence, 0.25);
    }
}
