//! Centralized helpers for WebSocket and HTTP error responses.
//!
//! Use these helpers to ensure all error messages are consistent, explicit, and include a code and context.
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

use crate::grid::GridError;

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_ACTION").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. session id, space id).
pub fn ws_error_message(code: &str, message: &str, context: Option<&str>) -> String {
    json!({
        "action": "Error",
        "data": { "code": code, "message": message, "context": context.unwrap_or("") },
    })
    .to_string()
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code.
/// - `message`: Human-readable error message.
/// - `context`: Optional context string.
/// - `status`: HTTP status code.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<&str>,
    status: StatusCode,
) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error": { "code": code, "message": message, "context": context.unwrap_or("") },
    }))
}

impl ResponseError for GridError {
    fn status_code(&self) -> StatusCode {
        match self {
            GridError::Conflict { .. } => StatusCode::CONFLICT,
            GridError::NotFound(_) => StatusCode::NOT_FOUND,
            GridError::InvalidPosition { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let context = match self {
            GridError::Conflict { occupant, .. } => occupant.to_string(),
            GridError::NotFound(id) => id.to_string(),
            GridError::InvalidPosition { x, y } => format!("{},{}", x, y),
        };
        http_error_response(self.code(), &self.to_string(), Some(&context), self.status_code())
    }
}
