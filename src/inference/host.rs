//! Process-wide owner of the loaded detector.

use crate::error::{Error, Result};
use crate::inference::{Detector, YoloDetector, YoloOptions};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::info;

/// Holds the detection model once it has been loaded.
///
/// The host starts empty and reports not-ready until a detector is installed.
/// A detector can be installed at most once; there is no unload or reload.
#[derive(Default)]
pub struct ModelHost {
    detector: OnceLock<Arc<dyn Detector>>,
}

impl ModelHost {
    /// Create an empty, not-ready host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load YOLO weights from `path` and install them.
    pub fn load(&self, path: &Path, options: &YoloOptions) -> Result<()> {
        if self.is_ready() {
            return Err(Error::ModelAlreadyLoaded);
        }
        info!("Loading model: {}", path.display());
        let detector = YoloDetector::load(path, options)?;
        self.install(Arc::new(detector))
    }

    /// Install an already constructed detector.
    pub fn install(&self, detector: Arc<dyn Detector>) -> Result<()> {
        self.detector
            .set(detector)
            .map_err(|_| Error::ModelAlreadyLoaded)
    }

    /// Whether a detector has been installed.
    pub fn is_ready(&self) -> bool {
        self.detector.get().is_some()
    }

    /// The installed detector, or [`Error::ModelNotReady`].
    pub fn detector(&self) -> Result<Arc<dyn Detector>> {
        self.detector.get().cloned().ok_or(Error::ModelNotReady)
    }
}

impl std::fmt::Debug for ModelHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHost")
            .field("ready", &self.is_ready())
            .finish()
    }
}
