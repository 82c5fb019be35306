//! Configuration loading and management.

mod file;
mod origins;
mod paths;
mod settings;
mod types;

pub use file::{init_config, load_config, load_config_file, save_config};
pub use origins::AllowedOrigins;
pub use paths::{config_dir, config_file_path, resolve_config_path};
pub use settings::{Settings, default_model_path};
pub use types::{Config, ModelConfig, ServerConfig};
