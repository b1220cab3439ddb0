// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Passphrase out of range, or it did not decrypt to a usable token.
    #[error("Invalid password")]
    InvalidPassword,

    /// The records endpoint could not be reached.
    #[error("Failed to connect to the server: {0}")]
    Connection(String),

    /// The records endpoint answered with a non-success status.
    #[error("Failed to download records: HTTP {0}")]
    DownloadFailed(u16),

    #[error("Malformed records payload: {0}")]
    MalformedPayload(String),

    /// No records have been loaded for this session yet.
    #[error("No records loaded; unlock the dashboard first")]
    NotLoaded,

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether the error should send the user back to the password prompt.
    pub fn is_credential_error(&self) -> bool {
        matches!(self, AppError::InvalidPassword | AppError::NotLoaded)
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidPassword => (StatusCode::UNAUTHORIZED, "invalid_password", None),
            AppError::Connection(msg) => {
                tracing::warn!(error = %msg, "Records endpoint unreachable");
                (StatusCode::BAD_GATEWAY, "connection_error", None)
            }
            AppError::DownloadFailed(status) => (
                StatusCode::BAD_GATEWAY,
                "download_failed",
                Some(format!("upstream status {}", status)),
            ),
            AppError::MalformedPayload(msg) => {
                (StatusCode::BAD_GATEWAY, "malformed_payload", Some(msg.clone()))
            }
            AppError::NotLoaded => (StatusCode::CONFLICT, "not_loaded", None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
