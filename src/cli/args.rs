//! CLI argument definitions.

use crate::cli::validators::parse_threshold;
use crate::constants::env;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Waste detection HTTP service backed by a YOLO model.
#[derive(Debug, Parser)]
#[command(name = "waste-classifier")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run. Starts the server when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Server options.
    #[command(flatten)]
    pub serve: ServeArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for running the server.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to the ONNX model weights [default: yolov8/runs/detect/train3/weights/best.onnx,
    /// looked up next to the executable, then in the current directory].
    #[arg(long, env = env::MODEL_PATH)]
    pub model_path: Option<PathBuf>,

    /// Path to a class-name file, one name per line (overrides model metadata).
    #[arg(long, env = env::LABELS_PATH)]
    pub labels_path: Option<PathBuf>,

    /// Minimum detection confidence.
    #[arg(short = 'c', long, value_parser = parse_threshold, env = env::MIN_CONFIDENCE)]
    pub min_confidence: Option<f32>,

    /// Comma-separated list of origins allowed by CORS (empty or unset: any).
    #[arg(long, env = env::ALLOWED_ORIGINS)]
    pub allowed_origins: Option<String>,

    /// Interface to bind.
    #[arg(long, env = env::HOST)]
    pub host: Option<String>,

    /// Port to bind.
    #[arg(short, long, env = env::PORT)]
    pub port: Option<u16>,

    /// Path to a TOML config file (default: platform config directory).
    #[arg(long, env = env::CONFIG, global = true)]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace+ORT info, -vvv: full trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args_serves() {
        let cli = Cli::try_parse_from(["waste-classifier"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.verbose, 0);
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "waste-classifier",
            "--model-path",
            "weights/best.onnx",
            "-c",
            "0.4",
            "-p",
            "8080",
            "-vv",
        ])
        .unwrap();
        assert_eq!(
            cli.serve.model_path,
            Some(PathBuf::from("weights/best.onnx"))
        );
        assert_eq!(cli.serve.min_confidence, Some(0.4));
        assert_eq!(cli.serve.port, Some(8080));
        assert_eq!(cli.serve.verbose, 2);
    }

    #[test]
    fn test_cli_parse_rejects_non_numeric_confidence() {
        let cli = Cli::try_parse_from(["waste-classifier", "--min-confidence", "high"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["waste-classifier", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_cli_parse_config_path_with_explicit_file() {
        let cli = Cli::try_parse_from([
            "waste-classifier",
            "config",
            "path",
            "--config",
            "/tmp/wc.toml",
        ])
        .unwrap();
        assert_eq!(cli.serve.config, Some(PathBuf::from("/tmp/wc.toml")));
    }
}
