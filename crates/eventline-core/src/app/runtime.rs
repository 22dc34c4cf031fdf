//! EventRuntime - queue + worker pool wiring
//!
//! Owns the bounded queue and the workers consuming it. Callers submit
//! through `EventRuntime::submit` or a cloned `Submitter`; both return as
//! soon as the task is buffered.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::{EventLifecycle, WorkerPool};
use crate::config::{ConfigError, RuntimeConfig};
use crate::domain::{Action, QueueError, SubmitError, Task};
use crate::observability::QueueStats;
use crate::ports::ProcessingSink;
use crate::queue::{CancelToken, TaskQueue};

/// Cloneable enqueue handle, e.g. for HTTP handlers.
#[derive(Clone)]
pub struct Submitter {
    queue: Arc<TaskQueue>,
}

impl Submitter {
    /// Parse `action` and enqueue without blocking.
    ///
    /// `event_type` is not validated here; an invalid type fails later in the
    /// worker and is only reported to the `ProcessingSink`.
    pub fn submit(&self, event_type: &str, action: &str) -> Result<(), SubmitError> {
        let action: Action = action.parse()?;
        Ok(self.queue.enqueue(Task::new(event_type, action))?)
    }

    pub fn enqueue(&self, task: Task) -> Result<(), QueueError> {
        self.queue.enqueue(task)
    }

    pub fn stats(&self) -> QueueStats {
        self.queue.stats()
    }
}

pub struct EventRuntime {
    submitter: Submitter,
    pool: WorkerPool,
    drain_timeout: Duration,
}

impl EventRuntime {
    /// Build the queue and spawn the workers. Must run inside a tokio runtime.
    pub fn start(
        config: &RuntimeConfig,
        handler: Arc<dyn EventLifecycle>,
        sink: Arc<dyn ProcessingSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let queue = Arc::new(TaskQueue::new(config.queue_capacity, CancelToken::new()));
        let pool = WorkerPool::spawn(config.workers, Arc::clone(&queue), handler, sink);

        info!(
            workers = config.workers,
            queue_capacity = config.queue_capacity,
            "event runtime started"
        );

        Ok(Self {
            submitter: Submitter { queue },
            pool,
            drain_timeout: config.drain_timeout(),
        })
    }

    pub fn submit(&self, event_type: &str, action: &str) -> Result<(), SubmitError> {
        self.submitter.submit(event_type, action)
    }

    pub fn enqueue(&self, task: Task) -> Result<(), QueueError> {
        self.submitter.enqueue(task)
    }

    pub fn submitter(&self) -> Submitter {
        self.submitter.clone()
    }

    pub fn stats(&self) -> QueueStats {
        self.submitter.stats()
    }

    pub fn workers(&self) -> usize {
        self.pool.size()
    }

    /// Stop accepting tasks, drain within the configured timeout, then
    /// cancel and join. Returns whether the drain completed.
    pub async fn shutdown(self) -> bool {
        info!(queued = self.stats().queued, "event runtime shutting down");
        self.pool.shutdown_timeout(self.drain_timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventCoordinator;
    use crate::domain::{EventState, UnknownAction};
    use crate::impls::{CountingSink, InMemoryEventStore};
    use crate::ports::SystemClock;

    fn config(queue_capacity: usize, workers: usize) -> RuntimeConfig {
        RuntimeConfig {
            queue_capacity,
            workers,
            drain_timeout_secs: 5,
        }
    }

    fn runtime(
        queue_capacity: usize,
        workers: usize,
    ) -> (EventRuntime, Arc<InMemoryEventStore>, Arc<CountingSink>) {
        let store = Arc::new(InMemoryEventStore::new());
        let coordinator = Arc::new(EventCoordinator::new(store.clone(), Arc::new(SystemClock)));
        let sink = Arc::new(CountingSink::new());
        let rt = EventRuntime::start(&config(queue_capacity, workers), coordinator, sink.clone())
            .unwrap();
        (rt, store, sink)
    }

    #[tokio::test]
    async fn rejects_invalid_config() {
        let store = Arc::new(InMemoryEventStore::new());
        let coordinator = Arc::new(EventCoordinator::new(store, Arc::new(SystemClock)));

        let result = EventRuntime::start(&config(10, 0), coordinator, Arc::new(CountingSink::new()));

        assert!(matches!(result, Err(ConfigError::Zero { field: "workers" })));
    }

    #[tokio::test]
    async fn unknown_action_is_rejected_at_submit() {
        let (rt, _store, sink) = runtime(4, 1);

        let err = rt.submit("abc", "pause").unwrap_err();

        assert!(matches!(err, SubmitError::UnknownAction(UnknownAction(a)) if a == "pause"));
        assert!(rt.shutdown().await);
        assert_eq!(sink.counts().total(), 0);
    }

    #[tokio::test]
    async fn start_then_finish_through_the_queue() {
        let (rt, store, sink) = runtime(1, 1);

        // capacity 1: a second submit may find the slot still taken
        rt.submit("abc", "start").unwrap();
        let second = rt.submit("abc", "start");
        assert!(matches!(
            second,
            Ok(()) | Err(SubmitError::Queue(QueueError::Full { capacity: 1 }))
        ));
        let expected = if second.is_ok() { 2 } else { 1 };
        sink.wait_for_total(expected).await;

        let docs = store.documents().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].state, EventState::Started);

        rt.submit("abc", "finish").unwrap();
        sink.wait_for_total(expected + 1).await;

        let docs = store.documents().await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].state, EventState::Finished);
        assert!(docs[0].finished_at.is_some());
        assert_eq!(docs[0].version, 2);
        assert_eq!(sink.counts().failed, 0);

        assert!(rt.shutdown().await);
    }

    #[tokio::test]
    async fn full_queue_reports_capacity() {
        let (rt, _store, _sink) = runtime(2, 1);
        // current-thread runtime: the worker cannot run until we yield
        let mut full = 0;
        for i in 0..10 {
            if let Err(QueueError::Full { capacity }) = rt.enqueue(Task::start(format!("t{i}"))) {
                assert_eq!(capacity, 2);
                full += 1;
            }
        }
        assert_eq!(full, 8);
        rt.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_processes_buffered_tasks_and_refuses_new_ones() {
        let (rt, store, sink) = runtime(100, 4);
        let submitter = rt.submitter();
        for i in 0..50 {
            submitter.submit(&format!("type{i}"), "start").unwrap();
        }

        assert!(rt.shutdown().await);

        assert_eq!(sink.counts().processed, 50);
        assert_eq!(store.len().await, 50);
        assert!(matches!(
            submitter.submit("late", "start"),
            Err(SubmitError::Queue(QueueError::Cancelled))
        ));
    }

    #[tokio::test]
    async fn invalid_type_is_only_seen_by_the_sink() {
        let (rt, store, sink) = runtime(4, 1);

        rt.submit("Not-Valid", "start").unwrap();
        let counts = sink.wait_for_total(1).await;

        assert_eq!(counts.failed, 1);
        assert!(store.is_empty().await);
        rt.shutdown().await;
    }
}
