//! HTTP surface for the coordinator.
//!
//! Provides endpoints for:
//! - Starting and finishing events (`/v1/start`, `/v1/finish`)
//! - Listing events (`/v1`)
//! - Health check (`/health`)

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use eventline_core::{EventCoordinator, Submitter};
use tower_http::trace::TraceLayer;

mod handlers;
pub mod responses;

/// Shared handler state.
pub struct AppState {
    pub coordinator: Arc<EventCoordinator>,
    /// `Some` in queued mode: writes are buffered and answered with 202.
    /// `None` in direct mode: writes call the coordinator inline.
    pub submitter: Option<Submitter>,
}

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1", get(handlers::list_events))
        .route("/v1/start", post(handlers::start_event))
        .route("/v1/finish", post(handlers::finish_event))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
