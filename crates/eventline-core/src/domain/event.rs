//! Event documents and their lifecycle state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EventId, EventType};

/// Lifecycle state of an event.
///
/// State transitions:
/// - Started -> Finished (the only one)
///
/// A finished event is never reopened; starting the same type again creates
/// a new document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventState {
    Started,
    Finished,
}

impl EventState {
    pub fn is_terminal(self) -> bool {
        matches!(self, EventState::Finished)
    }
}

/// A stored event document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,

    #[serde(rename = "type")]
    pub event_type: EventType,

    pub state: EventState,

    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    /// Starts at 1, +1 on every successful update.
    pub version: u64,
}

impl Event {
    pub fn is_started(&self) -> bool {
        self.state == EventState::Started
    }

    /// Apply the Started -> Finished transition to this copy.
    ///
    /// Only the in-memory value changes; persisting it is the store's job.
    pub fn mark_finished(&mut self, at: DateTime<Utc>) {
        self.state = EventState::Finished;
        self.finished_at = Some(at);
    }
}

/// Input to `EventStore::create`: everything except the store-assigned
/// id and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub event_type: EventType,
    pub state: EventState,
    pub started_at: DateTime<Utc>,
}

impl NewEvent {
    pub fn started(event_type: EventType, started_at: DateTime<Utc>) -> Self {
        Self {
            event_type,
            state: EventState::Started,
            started_at,
        }
    }
}

/// Read-path filter for listing events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// `None` lists every type.
    pub event_type: Option<EventType>,
    pub offset: u64,
    pub limit: u64,
}
