//! Waste classifier - YOLO-backed waste detection over HTTP.
//!
//! An uploaded image is run through an object-detection model, and the most
//! confident detection is labelled biodegradable or non-biodegradable.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod detect;
pub mod error;
pub mod inference;
pub mod server;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, ServeArgs};
use config::{Settings, init_config, load_config, resolve_config_path};
use constants::MAX_DETECTIONS;
use inference::{ModelHost, YoloOptions};
use std::sync::Arc;
use tracing::info;

pub use error::{Error, Result};

/// Main entry point for the waste classifier.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.serve.verbose, cli.serve.quiet);

    if let Some(command) = cli.command {
        return handle_command(command, &cli.serve);
    }

    serve(&cli.serve)
}

/// Load the model, then serve HTTP until shutdown.
fn serve(args: &ServeArgs) -> Result<()> {
    let file_config = load_config(args.config.as_deref())?;
    let settings = Settings::resolve(args, &file_config);

    // The model must be in memory before any request is accepted.
    let host = Arc::new(ModelHost::new());
    host.load(
        &settings.model_path,
        &YoloOptions {
            iou_threshold: settings.iou_threshold,
            max_detections: MAX_DETECTIONS,
            labels_path: settings.labels_path.clone(),
        },
    )?;

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;

    runtime.block_on(server::serve(&settings, host))
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging is noisy at info; use -v to see its warnings.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, args: &ServeArgs) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, args),
    }
}

fn handle_config_command(action: ConfigAction, args: &ServeArgs) -> Result<()> {
    let explicit = args.config.as_deref();

    match action {
        ConfigAction::Init => {
            let path = resolve_config_path(explicit)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = init_config(explicit)?;
                info!("Wrote default configuration");
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(explicit)?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = resolve_config_path(explicit)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
