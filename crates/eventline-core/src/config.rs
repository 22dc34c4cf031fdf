//! Runtime configuration for the queue and worker pool.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Sizing and shutdown knobs for `EventRuntime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Maximum number of buffered tasks.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Number of concurrent workers.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// How long shutdown waits for the queue to drain before cancelling.
    #[serde(default = "default_drain_timeout_secs")]
    pub drain_timeout_secs: u64,
}

fn default_queue_capacity() -> usize {
    500
}

fn default_workers() -> usize {
    50
}

fn default_drain_timeout_secs() -> u64 {
    10
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            workers: default_workers(),
            drain_timeout_secs: default_drain_timeout_secs(),
        }
    }
}

impl RuntimeConfig {
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::Zero {
                field: "queue_capacity",
            });
        }
        if self.workers == 0 {
            return Err(ConfigError::Zero { field: "workers" });
        }
        if self.drain_timeout_secs == 0 {
            return Err(ConfigError::Zero {
                field: "drain_timeout_secs",
            });
        }
        Ok(())
    }
}
