//! HTTP request and response types.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use eventline_core::domain::Event;
use serde::{Deserialize, Serialize};

// ============================================================================
// Event types
// ============================================================================

/// Request body for `/v1/start` and `/v1/finish`.
#[derive(Debug, Deserialize)]
pub struct EventRequest {
    #[serde(rename = "type", default)]
    pub event_type: String,
}

/// Query string for `GET /v1`. Numbers are parsed by hand so a bad value
/// can be answered with our own error body.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

/// Response for `GET /v1`.
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

/// Body for accepted and applied writes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

// ============================================================================
// Error types
// ============================================================================

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
        }),
    )
        .into_response()
}
