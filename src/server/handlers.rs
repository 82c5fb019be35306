//! Route handlers.

use crate::constants::UPLOAD_FIELD;
use crate::detect::{self, DetectResponse};
use crate::error::Error;
use crate::server::{ApiError, AppState};
use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Body of a successful `/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    if state.host.is_ready() {
        Ok(Json(HealthResponse {
            status: "ok".to_string(),
        }))
    } else {
        Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Model not loaded",
        ))
    }
}

/// `POST /detect`
pub async fn detect(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DetectResponse>, ApiError> {
    let detector = state.host.detector()?;
    let mut multipart = multipart?;
    let upload = read_upload(&mut multipart).await?;

    let start = Instant::now();
    let size = upload.len();
    let min_confidence = state.min_confidence;

    // Decoding and inference are CPU-bound; keep them off the async workers.
    let response = tokio::task::spawn_blocking(move || {
        let image = detect::decode_image(&upload)?;
        detect::classify_image(detector.as_ref(), &image, min_confidence)
    })
    .await
    .map_err(|e| Error::Inference {
        reason: format!("inference task failed: {e}"),
    })??;

    info!(
        "Classified {} byte upload: {} detection(s), top={} in {:.1}ms",
        size,
        response.detections.len(),
        response
            .top_prediction
            .as_ref()
            .map_or("none", |top| top.label.as_str()),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(Json(response))
}

/// Read the bytes of the `file` part, skipping any other parts.
async fn read_upload(multipart: &mut Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            return Ok(field.bytes().await?);
        }
    }

    Err(ApiError::new(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Missing file field",
    ))
}
