//! EventStore port - the persistent store the coordinator writes through.
//!
//! Any engine with per-document atomic conditional writes can implement it;
//! no multi-document transactions are needed because every operation touches
//! a single document.

use async_trait::async_trait;

use crate::domain::{Event, EventFilter, EventType, NewEvent, StoreError};

/// Optimistic-concurrency store for event documents.
///
/// # Contract
/// - `create` assigns a fresh id and `version = 1`. Implementations should
///   reject a second Started document for the same type with
///   `StoreError::AlreadyStarted`; without that constraint two concurrent
///   `start_event` calls can both insert.
/// - `update` is a compare-and-swap on `(id, version)`. On match it applies
///   `state` / `finished_at` and bumps the stored version by exactly 1; on
///   mismatch it returns `StoreError::Conflict` and changes nothing.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create(&self, event: NewEvent) -> Result<Event, StoreError>;

    /// The Started event for `event_type`, if any.
    async fn find_unfinished_by_type(
        &self,
        event_type: &EventType,
    ) -> Result<Option<Event>, StoreError>;

    async fn update(&self, event: &Event) -> Result<(), StoreError>;

    /// Newest first (by `started_at`), then `offset` / `limit`.
    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError>;
}
