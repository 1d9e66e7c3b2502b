use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::delivery::SinkError;
use crate::submission::pipeline::IntakeError;
use crate::submission::validator::ValidationError;

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    BadRequest(String),
    MethodNotAllowed,
    Sink(SinkError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(err) => write!(f, "Validation Error: {err}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            AppError::Sink(err) => write!(f, "Sink Error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": err.message,
                    "missingFields": err.missing_fields,
                }),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": "Invalid request body format", "error": msg }),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "success": false, "message": "Method not allowed" }),
            ),
            AppError::Sink(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "message": "Error saving to spreadsheet",
                    "error": err.to_string(),
                }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Rejected(e) => AppError::Validation(e),
            IntakeError::Sink { error, .. } => AppError::Sink(error),
        }
    }
}
