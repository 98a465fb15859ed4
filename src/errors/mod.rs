/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("External API error: {0}")]
    ExternalApi(#[from] reqwest::Error),
    #[error("{service} responded with status {status}")]
    Upstream { service: &'static str, status: u16 },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("A flight submission is already in progress")]
    SubmissionInFlight,
    #[error("The flight form is not open; reset before submitting again")]
    FormNotOpen,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ExternalApi(e) => upstream_code(e.status().map(|s| s.as_u16())),
            ApiError::Upstream { status, .. } => upstream_code(Some(*status)),
            ApiError::InvalidResponse(_) => "INVALID_RESPONSE",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            ApiError::FormNotOpen => "FORM_NOT_OPEN",
        }
    }
}

fn upstream_code(status: Option<u16>) -> &'static str {
    match status {
        Some(404) => "UPSTREAM_404",
        Some(429) => "UPSTREAM_429",
        Some(500..=599) => "UPSTREAM_5XX",
        _ => "UPSTREAM_ERROR",
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        // Always HTTP 200 with ok=false
        (StatusCode::OK, Json(error_response)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
