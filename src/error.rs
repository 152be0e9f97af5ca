// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::{
    calc::{AttemptError, PaperIssue},
    upstream::UpstreamError,
    utils::html::PromptError,
};

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., resubmitting a finished attempt)
    Conflict(String),

    // 422 Unprocessable Entity, one entry per rejected paper
    Validation(Vec<PaperIssue>),

    // 502 Bad Gateway (remote API failed or sent garbage)
    BadGateway(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::Validation(issues) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "Invalid marks", "issues": issues }),
            ),
            AppError::BadGateway(msg) => {
                tracing::error!("Upstream failure: {}", msg);
                (StatusCode::BAD_GATEWAY, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<AttemptError> for AppError {
    fn from(err: AttemptError) -> Self {
        match err {
            AttemptError::AlreadyFinished => AppError::Conflict(err.to_string()),
            AttemptError::UnknownQuestion(_) | AttemptError::StartedInFuture => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}

/// A rejected lookup is reported as 404 since `api.php` uses it for "no such record".
impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Rejected(msg) => AppError::NotFound(msg),
            other => AppError::BadGateway(other.to_string()),
        }
    }
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        AppError::BadGateway(format!("Undecodable question prompt: {err}"))
    }
}
