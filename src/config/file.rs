//! Configuration file loading.

use crate::config::{Config, resolve_config_path};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load configuration from a TOML file.
///
/// Returns default config if the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load configuration from an explicit path, or the platform default location.
///
/// When no platform config directory exists the defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    resolve_config_path(explicit).map_or_else(|_| Ok(Config::default()), |path| load_config_file(&path))
}

/// Save configuration to a TOML file.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents = toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;

    std::fs::write(path, contents).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a default configuration file, returning where it was written.
pub fn init_config(explicit: Option<&Path>) -> Result<PathBuf> {
    let path = resolve_config_path(explicit)?;
    save_config(&Config::default(), &path)?;
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_nonexistent_file_returns_default() {
        let path = Path::new("/nonexistent/path/config.toml");
        let config = load_config_file(path).unwrap();
        assert!(config.model.path.is_none());
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080
allowed_origins = ["http://localhost:5173"]

[model]
path = "/srv/models/waste.onnx"
min_confidence = 0.4
"#
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(
            config.model.path,
            Some(PathBuf::from("/srv/models/waste.onnx"))
        );
        assert_eq!(config.model.min_confidence, 0.4);
        assert_eq!(config.model.iou_threshold, 0.7);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let result = load_config_file(file.path());
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_init_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let written = init_config(Some(&path)).unwrap();
        assert_eq!(written, path);

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.model.min_confidence, 0.25);
    }
}
