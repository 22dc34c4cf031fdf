//! InMemoryEventStore - 開発用・テスト用の EventStore
//!
//! Documents live in a `Vec` behind a tokio `Mutex`. Every operation runs
//! under the lock, so create / update are atomic per call, which is all the
//! `EventStore` contract asks for.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{Event, EventFilter, EventState, EventType, NewEvent, StoreError};
use crate::ports::{EventStore, IdGenerator, SystemClock, UlidGenerator};

pub struct InMemoryEventStore {
    /// Insertion order.
    docs: Mutex<Vec<Event>>,
    ids: Arc<dyn IdGenerator>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::with_id_generator(Arc::new(UlidGenerator::new(SystemClock)))
    }

    pub fn with_id_generator(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            docs: Mutex::new(Vec::new()),
            ids,
        }
    }

    /// Copy of every stored document, in insertion order.
    pub async fn documents(&self) -> Vec<Event> {
        self.docs.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.docs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.lock().await.is_empty()
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn create(&self, event: NewEvent) -> Result<Event, StoreError> {
        let mut docs = self.docs.lock().await;

        // (type, state=Started) の一意制約
        if event.state == EventState::Started
            && docs
                .iter()
                .any(|d| d.is_started() && d.event_type == event.event_type)
        {
            return Err(StoreError::AlreadyStarted(event.event_type));
        }

        let stored = Event {
            id: self.ids.generate_event_id(),
            event_type: event.event_type,
            state: event.state,
            started_at: event.started_at,
            finished_at: None,
            version: 1,
        };
        docs.push(stored.clone());
        debug!(id = %stored.id, event_type = %stored.event_type, "event document inserted");

        Ok(stored)
    }

    async fn find_unfinished_by_type(
        &self,
        event_type: &EventType,
    ) -> Result<Option<Event>, StoreError> {
        let docs = self.docs.lock().await;
        Ok(docs
            .iter()
            .find(|d| d.is_started() && &d.event_type == event_type)
            .cloned())
    }

    async fn update(&self, event: &Event) -> Result<(), StoreError> {
        let mut docs = self.docs.lock().await;

        let Some(doc) = docs
            .iter_mut()
            .find(|d| d.id == event.id && d.version == event.version)
        else {
            return Err(StoreError::Conflict {
                id: event.id,
                expected_version: event.version,
            });
        };

        doc.state = event.state;
        doc.finished_at = event.finished_at;
        doc.version += 1;
        debug!(id = %doc.id, version = doc.version, "event document updated");

        Ok(())
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, StoreError> {
        let docs = self.docs.lock().await;

        // newest insert first, then a stable sort keeps that order for ties
        let mut matching: Vec<Event> = docs
            .iter()
            .rev()
            .filter(|d| {
                filter
                    .event_type
                    .as_ref()
                    .is_none_or(|t| &d.event_type == t)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.started_at.cmp(&a.started_at));

        let offset = usize::try_from(filter.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }
}
