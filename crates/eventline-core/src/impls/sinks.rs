//! ProcessingSink implementations.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Notify;
use tracing::{error, info, warn};

use crate::domain::{CoordinatorError, Task};
use crate::observability::ProcessingCounts;
use crate::ports::ProcessingSink;

/// Logs every outcome through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProcessingSink for TracingSink {
    fn processed(&self, worker_id: usize, task: &Task) {
        info!(
            worker_id,
            event_type = %task.event_type,
            action = %task.action,
            "task processed"
        );
    }

    fn failed(&self, worker_id: usize, task: &Task, error: &CoordinatorError) {
        error!(
            worker_id,
            event_type = %task.event_type,
            action = %task.action,
            error = %error,
            "failed to process task"
        );
    }

    fn abandoned(&self, task: &Task) {
        warn!(
            event_type = %task.event_type,
            action = %task.action,
            "task abandoned at shutdown"
        );
    }
}

/// Counts outcomes, optionally forwarding each one to an inner sink.
pub struct CountingSink {
    processed: AtomicU64,
    failed: AtomicU64,
    abandoned: AtomicU64,
    changed: Notify,
    inner: Option<Arc<dyn ProcessingSink>>,
}

impl CountingSink {
    pub fn new() -> Self {
        Self {
            processed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            abandoned: AtomicU64::new(0),
            changed: Notify::new(),
            inner: None,
        }
    }

    pub fn wrapping(inner: Arc<dyn ProcessingSink>) -> Self {
        Self {
            inner: Some(inner),
            ..Self::new()
        }
    }

    pub fn counts(&self) -> ProcessingCounts {
        ProcessingCounts {
            processed: self.processed.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
            abandoned: self.abandoned.load(Ordering::Acquire),
        }
    }

    /// Wait until at least `total` outcomes (processed + failed + abandoned) were recorded.
    pub async fn wait_for_total(&self, total: u64) -> ProcessingCounts {
        loop {
            let notified = self.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let counts = self.counts();
            if counts.total() >= total {
                return counts;
            }
            notified.await;
        }
    }
}

impl Default for CountingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingSink for CountingSink {
    fn processed(&self, worker_id: usize, task: &Task) {
        if let Some(inner) = &self.inner {
            inner.processed(worker_id, task);
        }
        self.processed.fetch_add(1, Ordering::AcqRel);
        self.changed.notify_waiters();
    }

    fn failed(&self, worker_id: usize, task: &Task, error: &CoordinatorError) {
        if let Some(inner) = &self.inner {
            inner.failed(worker_id, task, error);
        }
        self.failed.fetch_add(1, Ordering::AcqRel);
        self.changed.notify_waiters();
    }

    fn abandoned(&self, task: &Task) {
        if let Some(inner) = &self.inner {
            inner.abandoned(task);
        }
        self.abandoned.fetch_add(1, Ordering::AcqRel);
        self.changed.notify_waiters();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventType, InvalidEventType};
    use std::time::Duration;

    #[test]
    fn counts_and_forwards() {
        let inner = Arc::new(CountingSink::new());
        let sink = CountingSink::wrapping(inner.clone());
        let task = Task::start("abc");

        sink.processed(0, &task);
        sink.processed(1, &task);
        sink.failed(
            2,
            &task,
            &CoordinatorError::NotFound(EventType::parse("abc").unwrap()),
        );
        sink.abandoned(&Task::finish("abc"));

        let expected = ProcessingCounts {
            processed: 2,
            failed: 1,
            abandoned: 1,
        };
        assert_eq!(sink.counts(), expected);
        assert_eq!(inner.counts(), expected);
    }

    #[tokio::test]
    async fn wait_for_total_wakes_on_record() {
        let sink = Arc::new(CountingSink::new());

        let waiter = tokio::spawn({
            let sink = sink.clone();
            async move { sink.wait_for_total(2).await }
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        sink.processed(0, &Task::start("abc"));
        sink.failed(
            0,
            &Task::start("Bad"),
            &CoordinatorError::InvalidType(InvalidEventType("Bad".into())),
        );

        let counts = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            counts,
            ProcessingCounts {
                processed: 1,
                failed: 1,
                abandoned: 0,
            }
        );
    }
}
