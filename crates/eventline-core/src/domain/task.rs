use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::UnknownAction;

/// What a queued task asks the coordinator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Finish,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Finish => "finish",
        }
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Action::Start),
            "finish" => Ok(Action::Finish),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit of work moving through the task queue.
///
/// `event_type` is carried as the caller sent it; validation happens when a
/// worker hands it to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub event_type: String,
    pub action: Action,
}

impl Task {
    pub fn new(event_type: impl Into<String>, action: Action) -> Self {
        Self {
            event_type: event_type.into(),
            action,
        }
    }

    pub fn start(event_type: impl Into<String>) -> Self {
        Self::new(event_type, Action::Start)
    }

    pub fn finish(event_type: impl Into<String>) -> Self {
        Self::new(event_type, Action::Finish)
    }
}
