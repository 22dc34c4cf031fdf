//! HTTP handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eventline_core::EventLifecycle;
use eventline_core::app::MAX_LIST_LIMIT;
use eventline_core::domain::{Action, CoordinatorError, QueueError, StoreError, Task};
use tracing::{debug, error, warn};

use super::AppState;
use super::responses::{EventRequest, EventsResponse, ListQuery, StatusResponse, error_response};

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn start_event(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EventRequest>, JsonRejection>,
) -> Response {
    handle_write(&state, body, Action::Start).await
}

pub async fn finish_event(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EventRequest>, JsonRejection>,
) -> Response {
    handle_write(&state, body, Action::Finish).await
}

async fn handle_write(
    state: &AppState,
    body: Result<Json<EventRequest>, JsonRejection>,
    action: Action,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(error = %rejection, action = %action, "invalid request body");
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };
    if req.event_type.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Event type is required");
    }

    // queued mode: acknowledge once buffered, outcome goes to the sink
    if let Some(submitter) = &state.submitter {
        return match submitter.enqueue(Task::new(req.event_type, action)) {
            Ok(()) => (
                StatusCode::ACCEPTED,
                Json(StatusResponse { status: "accepted" }),
            )
                .into_response(),
            Err(e) => {
                warn!(error = %e, action = %action, "task rejected");
                error_response(queue_error_status(&e), e.to_string())
            }
        };
    }

    let result = match action {
        Action::Start => state.coordinator.start_event(&req.event_type).await,
        Action::Finish => state.coordinator.finish_event(&req.event_type).await,
    };
    match result {
        Ok(()) => (StatusCode::OK, Json(StatusResponse { status: "ok" })).into_response(),
        Err(e) => coordinator_error_response(&e),
    }
}

/// `GET /v1?type=&offset=&limit=`
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    let offset = match parse_number(query.offset.as_deref(), 0) {
        Ok(n) => n,
        Err(raw) => {
            return error_response(StatusCode::BAD_REQUEST, format!("invalid offset {raw:?}"));
        }
    };
    let limit = match parse_number(query.limit.as_deref(), MAX_LIST_LIMIT) {
        Ok(n) => n.min(MAX_LIST_LIMIT),
        Err(raw) => {
            return error_response(StatusCode::BAD_REQUEST, format!("invalid limit {raw:?}"));
        }
    };

    debug!(event_type = ?query.event_type, offset, limit, "listing events");
    match state
        .coordinator
        .list_events(query.event_type.as_deref(), offset, limit)
        .await
    {
        Ok(events) => Json(EventsResponse { events }).into_response(),
        Err(e) => coordinator_error_response(&e),
    }
}

/// Missing or empty values fall back to `default`; anything else must be a
/// non-negative integer.
fn parse_number(raw: Option<&str>, default: u64) -> Result<u64, String> {
    match raw {
        None | Some("") => Ok(default),
        Some(s) => s.parse().map_err(|_| s.to_string()),
    }
}

pub fn queue_error_status(err: &QueueError) -> StatusCode {
    match err {
        QueueError::Full { .. } | QueueError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub fn coordinator_error_status(err: &CoordinatorError) -> StatusCode {
    match err {
        CoordinatorError::InvalidType(_) | CoordinatorError::InvalidLimit { .. } => {
            StatusCode::BAD_REQUEST
        }
        CoordinatorError::NotFound(_) => StatusCode::NOT_FOUND,
        CoordinatorError::Conflict(_) | CoordinatorError::Store(StoreError::Conflict { .. }) => {
            StatusCode::CONFLICT
        }
        CoordinatorError::Store(_) | CoordinatorError::Panicked(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn coordinator_error_response(err: &CoordinatorError) -> Response {
    let status = coordinator_error_status(err);
    if status.is_server_error() {
        error!(error = %err, "request failed");
        // backend details stay in the log
        return error_response(status, "internal error");
    }
    error_response(status, err.to_string())
}
