//! WorkerPool - キュー消費ワーカー群
//!
//! A fixed number of tokio tasks pull from the shared `TaskQueue` and call
//! the matching `EventLifecycle` operation.
//!
//! # Delivery guarantee: at most once
//! A task is removed from the queue before it is processed and is never put
//! back. When the coordinator returns an error (invalid type, no started
//! event, conflict, store failure) the outcome goes to the `ProcessingSink`
//! and the task is dropped; there is no retry and no dead-letter queue. The
//! submitter already got its acknowledgement at enqueue time, so the sink is
//! the only place such a failure is visible.
//!
//! Tasks for the same event type may run on different workers concurrently;
//! no per-type ordering is enforced beyond what the store's conditional
//! writes provide.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::EventLifecycle;
use crate::domain::{Action, CoordinatorError, Task};
use crate::ports::ProcessingSink;
use crate::queue::{CancelToken, TaskQueue};

/// Worker pool handle.
/// - `shutdown()` で queue を close し、残タスクを処理してから終了
/// - `cancel()` で処理中のタスクだけ終えて即終了
pub struct WorkerPool {
    queue: Arc<TaskQueue>,
    cancel: CancelToken,
    sink: Arc<dyn ProcessingSink>,
    joins: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `workers` consumers of `queue`, bound to the queue's own
    /// cancellation signal.
    pub fn spawn(
        workers: usize,
        queue: Arc<TaskQueue>,
        handler: Arc<dyn EventLifecycle>,
        sink: Arc<dyn ProcessingSink>,
    ) -> Self {
        let mut joins = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let q = Arc::clone(&queue);
            let h = Arc::clone(&handler);
            let s = Arc::clone(&sink);

            joins.push(tokio::spawn(async move {
                worker_loop(worker_id, q, h, s).await;
            }));
        }
        debug!(workers, "worker pool started");

        Self {
            cancel: queue.cancel_token(),
            queue,
            sink,
            joins,
        }
    }

    pub fn size(&self) -> usize {
        self.joins.len()
    }

    /// Signal cancellation: workers stop after their in-flight task and
    /// whatever is still buffered is left in the queue.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Close the queue, let the workers drain it, and wait for all of them.
    pub async fn shutdown(mut self) {
        self.queue.close();
        join_all(&mut self.joins).await;
        info!("worker pool stopped");
    }

    /// Like `shutdown`, but cancels once `timeout` has passed. Tasks still
    /// buffered at that point are reported through `ProcessingSink::abandoned`.
    ///
    /// Returns `true` if the queue drained before the deadline.
    pub async fn shutdown_timeout(mut self, timeout: Duration) -> bool {
        self.queue.close();

        let drained = tokio::time::timeout(timeout, join_all(&mut self.joins))
            .await
            .is_ok();
        if !drained {
            warn!(?timeout, "drain timed out, cancelling workers");
            self.cancel.cancel();
            join_all(&mut self.joins).await;
        }

        let leftover = self.queue.drain();
        if !leftover.is_empty() {
            warn!(abandoned = leftover.len(), "buffered tasks abandoned");
        }
        for task in &leftover {
            self.sink.abandoned(task);
        }

        info!(drained, "worker pool stopped");
        drained
    }
}

/// Await every handle, popping each once it finished.
///
/// Safe to call again after being dropped mid-way by a timeout: handles
/// already joined are gone from `joins`.
async fn join_all(joins: &mut Vec<JoinHandle<()>>) {
    while let Some(join) = joins.last_mut() {
        if let Err(e) = join.await {
            warn!(error = %e, "worker task ended abnormally");
        }
        joins.pop();
    }
}

async fn worker_loop(
    worker_id: usize,
    queue: Arc<TaskQueue>,
    handler: Arc<dyn EventLifecycle>,
    sink: Arc<dyn ProcessingSink>,
) {
    // dequeue は close + 空 / cancel で None
    while let Some(task) = queue.dequeue().await {
        process(worker_id, task, &handler, sink.as_ref()).await;
    }
    debug!(worker_id, "worker exiting");
}

/// Run one task on its own tokio task so a panicking handler costs that
/// task only, never the worker.
async fn process(
    worker_id: usize,
    task: Task,
    handler: &Arc<dyn EventLifecycle>,
    sink: &dyn ProcessingSink,
) {
    let h = Arc::clone(handler);
    let (event_type, action) = (task.event_type.clone(), task.action);
    let call = tokio::spawn(async move {
        match action {
            Action::Start => h.start_event(&event_type).await,
            Action::Finish => h.finish_event(&event_type).await,
        }
    });

    let result = match call.await {
        Ok(result) => result,
        Err(e) => {
            error!(worker_id, event_type = %task.event_type, error = %e, "task handler aborted");
            Err(CoordinatorError::Panicked(e.to_string()))
        }
    };

    match result {
        Ok(()) => sink.processed(worker_id, &task),
        Err(err) => sink.failed(worker_id, &task, &err),
    }
}
