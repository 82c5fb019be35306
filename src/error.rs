//! Error types for the waste classifier.

/// Result type alias for waste classifier operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the waste classifier.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to bind the listening socket.
    #[error("failed to bind {address}")]
    Bind {
        /// The `host:port` that was requested.
        address: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Model file does not exist.
    #[error("model file does not exist: {path}")]
    ModelFileNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
    },

    /// Labels file does not exist.
    #[error("labels file does not exist: {path}")]
    LabelsFileNotFound {
        /// Path to the missing labels file.
        path: std::path::PathBuf,
    },

    /// Failed to read labels file.
    #[error("failed to read labels file '{path}'")]
    LabelsRead {
        /// Path to the labels file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to load the detection model.
    #[error("failed to load model: {reason}")]
    ModelLoad {
        /// Description of the load failure.
        reason: String,
    },

    /// A model was already installed in the host.
    #[error("model is already loaded")]
    ModelAlreadyLoaded,

    /// The model host has no model yet.
    #[error("model not ready")]
    ModelNotReady,

    /// Uploaded payload was empty.
    #[error("empty upload")]
    EmptyUpload,

    /// Uploaded payload could not be decoded as an image.
    #[error("could not decode image")]
    ImageDecode {
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Inference failed.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}
