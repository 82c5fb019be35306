//! HTTP surface: `GET /health` and `POST /detect`.

mod cors;
mod error;
pub mod handlers;

pub use cors::cors_layer;
pub use error::{ApiError, ErrorBody};

use crate::config::{AllowedOrigins, Settings};
use crate::error::{Error, Result};
use crate::inference::ModelHost;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded model, or an empty host before startup completes.
    pub host: Arc<ModelHost>,
    /// Minimum confidence passed to every inference call.
    pub min_confidence: f32,
}

/// Build the application router.
pub fn build_router(state: AppState, origins: &AllowedOrigins, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/detect", post(handlers::detect))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors_layer(origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn serve(settings: &Settings, host: Arc<ModelHost>) -> Result<()> {
    let state = AppState {
        host,
        min_confidence: settings.min_confidence,
    };
    let app = build_router(
        state,
        &settings.allowed_origins,
        settings.max_upload_bytes,
    );

    let address = settings.bind_address();
    let listener = TcpListener::bind((settings.host.as_str(), settings.port))
        .await
        .map_err(|e| Error::Bind {
            address: address.clone(),
            source: e,
        })?;

    info!(
        "Listening on http://{} (min_confidence={}, allowed_origins={})",
        listener.local_addr().map_or(address, |a| a.to_string()),
        settings.min_confidence,
        settings.allowed_origins
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
