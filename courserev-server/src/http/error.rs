//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Every report error kind gets its own `error` code in the body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use courserev_core::ReportError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Course report failed; status depends on the error kind
    Report(ReportError),

    /// Request could not be parsed (400)
    BadRequest { message: String },
}

/// HTTP status for each report error kind
pub fn status_for(error: &ReportError) -> StatusCode {
    match error {
        ReportError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
        ReportError::NotFound { .. } => StatusCode::NOT_FOUND,
        ReportError::AmbiguousMatch { .. } => StatusCode::CONFLICT,
        ReportError::DanglingReference { .. } | ReportError::InvalidDocument { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ReportError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ReportError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Report(e) => {
                let status = status_for(e);
                let message = match e {
                    // Data integrity problems: log the detail, return a generic message
                    ReportError::DanglingReference { .. } | ReportError::InvalidDocument { .. } => {
                        tracing::error!(error = %e, "Course report failed");
                        "an internal error occurred".to_string()
                    }
                    // Store errors can carry connection detail; keep it in the log
                    ReportError::UpstreamUnavailable { .. } => {
                        tracing::error!(error = %e, "Course report failed");
                        "the document store is unavailable".to_string()
                    }
                    ReportError::Timeout { .. } => {
                        tracing::error!(error = %e, "Course report failed");
                        "the document store did not respond in time".to_string()
                    }
                    _ => e.to_string(),
                };
                (
                    status,
                    json!({
                        "error": e.code(),
                        "message": message
                    }),
                )
            }
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}
