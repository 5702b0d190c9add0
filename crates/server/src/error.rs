//! Unified error handling with Sentry integration.
//!
//! Upstream commerce-API failures are absorbed by the mock fallback and never
//! become an `AppError`; what remains is the OAuth callback path and the
//! catch-all internal error, both answered with a generic body so no internal
//! detail leaks to the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::wix::WixError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// OAuth code exchange or token storage failed.
    #[error("OAuth error: {0}")]
    OAuth(#[from] WixError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry before the details are discarded
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );

        match self {
            Self::OAuth(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro na autenticação. Veja logs do servidor.",
            )
                .into_response(),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Erro interno do servidor" })),
            )
                .into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
