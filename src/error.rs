// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Every failure is rendered as `{"success": false, "error": "..."}` with a
//! fixed status code per variant.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("{0}")]
    AuthenticationFailed(String),

    #[error("{0}")]
    SignUpRejected(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    OperationFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized
            | AppError::InvalidToken
            | AppError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            AppError::SignUpRejected(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::IdentityProvider(_)
            | AppError::Database(_)
            | AppError::OperationFailed(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error = match &self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::AuthenticationFailed(msg)
            | AppError::SignUpRejected(msg)
            | AppError::OperationFailed(msg) => msg.clone(),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                msg.clone()
            }
            AppError::IdentityProvider(msg) => {
                tracing::error!(error = %msg, "Identity provider error");
                msg.clone()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            success: false,
            error,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
