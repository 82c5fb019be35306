//! Effective runtime settings.
//!
//! Precedence: CLI flag or environment variable, then config file, then the
//! built-in default.

use crate::cli::ServeArgs;
use crate::config::{AllowedOrigins, Config};
use crate::constants::DEFAULT_MODEL_PATH;
use std::path::{Path, PathBuf};

/// Settings the server runs with, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path to the ONNX weights.
    pub model_path: PathBuf,
    /// Optional class-name file overriding names embedded in the model.
    pub labels_path: Option<PathBuf>,
    /// Minimum detection confidence.
    pub min_confidence: f32,
    /// IoU threshold for non-maximum suppression.
    pub iou_threshold: f32,
    /// CORS allow-list.
    pub allowed_origins: AllowedOrigins,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Request body limit in bytes.
    pub max_upload_bytes: usize,
}

impl Settings {
    /// Merge command-line/environment overrides over the file configuration.
    pub fn resolve(args: &ServeArgs, config: &Config) -> Self {
        let model_path = args
            .model_path
            .clone()
            .or_else(|| config.model.path.clone())
            .unwrap_or_else(|| {
                let exe_dir = std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(Path::to_path_buf));
                default_model_path(exe_dir.as_deref())
            });

        let allowed_origins = args.allowed_origins.as_deref().map_or_else(
            || AllowedOrigins::from_entries(&config.server.allowed_origins),
            AllowedOrigins::parse,
        );

        Self {
            model_path,
            labels_path: args
                .labels_path
                .clone()
                .or_else(|| config.model.labels.clone()),
            min_confidence: args.min_confidence.unwrap_or(config.model.min_confidence),
            iou_threshold: config.model.iou_threshold,
            allowed_origins,
            host: args
                .host
                .clone()
                .unwrap_or_else(|| config.server.host.clone()),
            port: args.port.unwrap_or(config.server.port),
            max_upload_bytes: config.server.max_upload_bytes,
        }
    }

    /// `host:port` for logging and error messages.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Default weights location: next to the executable when present there,
/// otherwise relative to the working directory.
pub fn default_model_path(exe_dir: Option<&Path>) -> PathBuf {
    exe_dir
        .map(|dir| dir.join(DEFAULT_MODEL_PATH))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}
