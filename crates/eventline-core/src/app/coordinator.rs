//! EventCoordinator - Started → Finished の状態遷移
//!
//! Validates event types and applies the lifecycle transitions through an
//! `EventStore`. Usable directly (synchronous surface) or behind the task
//! queue via the worker pool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{
    CoordinatorError, Event, EventFilter, EventType, NewEvent, StoreError,
};
use crate::ports::{Clock, EventStore};

/// Upper bound for `list_events` page size.
pub const MAX_LIST_LIMIT: u64 = 100;

/// The two lifecycle operations workers dispatch to.
#[async_trait]
pub trait EventLifecycle: Send + Sync {
    async fn start_event(&self, event_type: &str) -> Result<(), CoordinatorError>;

    async fn finish_event(&self, event_type: &str) -> Result<(), CoordinatorError>;
}

pub struct EventCoordinator {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
}

impl EventCoordinator {
    pub fn new(store: Arc<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Read path: newest first, optionally filtered by type.
    ///
    /// An empty `event_type` means every type.
    ///
    /// # Errors
    /// - `InvalidLimit` when `limit > MAX_LIST_LIMIT`
    /// - `InvalidType` when a non-empty type fails validation
    pub async fn list_events(
        &self,
        event_type: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Event>, CoordinatorError> {
        if limit > MAX_LIST_LIMIT {
            return Err(CoordinatorError::InvalidLimit {
                limit,
                max: MAX_LIST_LIMIT,
            });
        }

        let event_type = match event_type {
            Some(t) if !t.is_empty() => Some(EventType::parse(t)?),
            _ => None,
        };

        let filter = EventFilter {
            event_type,
            offset,
            limit,
        };
        Ok(self.store.list(&filter).await?)
    }
}

#[async_trait]
impl EventLifecycle for EventCoordinator {
    /// Open a Started event for `event_type` unless one is already open.
    ///
    /// # Errors
    /// - `InvalidType` (no store access happens)
    /// - `Store` for backend failures
    async fn start_event(&self, event_type: &str) -> Result<(), CoordinatorError> {
        let event_type = EventType::parse(event_type)?;

        if let Some(existing) = self.store.find_unfinished_by_type(&event_type).await? {
            debug!(event_type = %event_type, id = %existing.id, "event already started");
            return Ok(());
        }

        let new_event = NewEvent::started(event_type.clone(), self.clock.now());
        match self.store.create(new_event).await {
            Ok(created) => {
                info!(event_type = %event_type, id = %created.id, "event started");
                Ok(())
            }
            // another writer created it between our lookup and insert
            Err(StoreError::AlreadyStarted(_)) => {
                debug!(event_type = %event_type, "event started concurrently");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Move the open event of `event_type` to Finished.
    ///
    /// # Errors
    /// - `InvalidType` (no store access happens)
    /// - `NotFound` when no Started event exists
    /// - `Conflict` when the conditional update lost against another writer;
    ///   not retried
    /// - `Store` for backend failures
    async fn finish_event(&self, event_type: &str) -> Result<(), CoordinatorError> {
        let event_type = EventType::parse(event_type)?;

        let Some(mut event) = self.store.find_unfinished_by_type(&event_type).await? else {
            return Err(CoordinatorError::NotFound(event_type));
        };

        event.mark_finished(self.clock.now());
        match self.store.update(&event).await {
            Ok(()) => {
                info!(
                    event_type = %event_type,
                    id = %event.id,
                    version = event.version + 1,
                    "event finished"
                );
                Ok(())
            }
            Err(StoreError::Conflict { id, expected_version }) => {
                warn!(
                    event_type = %event_type,
                    id = %id,
                    expected_version,
                    "event was modified by another writer"
                );
                Err(CoordinatorError::Conflict(event_type))
            }
            Err(err) => Err(err.into()),
        }
    }
}
