//! Errors - エラー型と分類
//!
//! - `StoreError`: store adapter failures (including CAS conflicts)
//! - `QueueError`: synchronous backpressure / shutdown signals from enqueue
//! - `CoordinatorError`: what `start_event` / `finish_event` / `list_events` return
//! - `SubmitError`: what the enqueue surface returns

use thiserror::Error;

use super::{EventId, EventType};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Event type failed `^[a-z0-9]+$`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid event type {0:?}: only lowercase letters and digits are allowed")]
pub struct InvalidEventType(pub String);

/// Action string was neither `start` nor `finish`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action {0:?}: expected \"start\" or \"finish\"")]
pub struct UnknownAction(pub String);

#[derive(Debug, Error)]
pub enum StoreError {
    /// Conditional update matched no document: the stored version moved on.
    #[error("event {id} was modified by another writer (expected version {expected_version})")]
    Conflict { id: EventId, expected_version: u64 },

    /// Create would produce a second Started document for the same type.
    #[error("a started event already exists for type={0}")]
    AlreadyStarted(EventType),

    #[error("store backend failure: {0}")]
    Backend(#[source] BoxError),
}

impl StoreError {
    pub fn backend(cause: impl Into<BoxError>) -> Self {
        StoreError::Backend(cause.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("task queue is full (capacity={capacity})")]
    Full { capacity: usize },

    #[error("task queue is shutting down")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    InvalidType(#[from] InvalidEventType),

    #[error("limit {limit} exceeds maximum of {max}")]
    InvalidLimit { limit: u64, max: u64 },

    #[error("no unfinished event found for type={0}")]
    NotFound(EventType),

    #[error("event for type={0} was modified concurrently")]
    Conflict(EventType),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The handler panicked while processing a queued task.
    #[error("task handler panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),

    #[error(transparent)]
    Queue(#[from] QueueError),
}
