//! Error types and handling for the skybrief service

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Main error type for the skybrief service
///
/// Every variant is terminal for the request it occurred in: there are no
/// retries and no partial results. The HTTP layer maps client-side faults to
/// 400 and upstream-side faults to 502.
#[derive(Error, Debug)]
pub enum SkybriefError {
    /// Bad client input (missing, unparseable, or out-of-range coordinates)
    #[error("invalid input: {message}")]
    Validation { message: String },

    /// Upstream fetch or decode failure (network, non-2xx, malformed JSON)
    #[error("upstream error: {message}")]
    Upstream { message: String },

    /// No usable forecast period in an otherwise valid upstream response
    #[error("forecast selection failed: {message}")]
    Selection { message: String },
}

impl SkybriefError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new selection error
    pub fn selection<S: Into<String>>(message: S) -> Self {
        Self::Selection {
            message: message.into(),
        }
    }

    /// HTTP status reflecting whether the fault is client-side or upstream-side
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            SkybriefError::Validation { .. } => StatusCode::BAD_REQUEST,
            SkybriefError::Upstream { .. } | SkybriefError::Selection { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for SkybriefError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
