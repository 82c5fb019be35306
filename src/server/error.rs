//! HTTP error responses.

use crate::error::Error;
use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub detail: String,
}

/// An error ready to be sent to the client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Build an error with an explicit status.
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Response status.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response message.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::ModelNotReady => Self::new(StatusCode::SERVICE_UNAVAILABLE, "Model not ready"),
            Error::EmptyUpload => Self::new(StatusCode::BAD_REQUEST, "Empty file"),
            Error::ImageDecode { source } => {
                debug!("Rejected upload: {source}");
                Self::new(StatusCode::BAD_REQUEST, "Could not parse image")
            }
            Error::Inference { reason } => {
                warn!("Inference failed: {reason}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Inference failed")
            }
            other => {
                error!("Unhandled error: {other}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
