use serde::{Deserialize, Serialize};

/// Task outcomes seen by the worker pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingCounts {
    pub processed: u64,
    pub failed: u64,
    /// Dropped from the buffer by a timed-out shutdown.
    pub abandoned: u64,
}

impl ProcessingCounts {
    pub fn total(&self) -> u64 {
        self.processed + self.failed + self.abandoned
    }
}

/// Point-in-time view of the task queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub queued: usize,
    pub capacity: usize,
    pub closed: bool,
}
