//! Bounded multi-producer / multi-consumer task queue.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tracing::debug;

use super::CancelToken;
use crate::domain::{QueueError, Task};
use crate::observability::QueueStats;

struct QueueState {
    buf: VecDeque<Task>,
    closed: bool,
}

/// Fixed-capacity FIFO of tasks.
///
/// - `enqueue` never waits: a full buffer is reported as `QueueError::Full`.
/// - `dequeue` waits for a task, for `close` + drain, or for cancellation.
///
/// The buffer sits behind a std `Mutex` that is never held across an
/// `.await`, so `enqueue` is a plain synchronous call usable from any thread.
pub struct TaskQueue {
    state: Mutex<QueueState>,
    capacity: usize,
    notify: Notify,
    cancel: CancelToken,
}

impl TaskQueue {
    pub fn new(capacity: usize, cancel: CancelToken) -> Self {
        Self {
            state: Mutex::new(QueueState {
                buf: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            capacity,
            notify: Notify::new(),
            cancel,
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `task` without blocking.
    ///
    /// # Errors
    /// - `QueueError::Cancelled` once the queue is closed or cancelled
    /// - `QueueError::Full` when `capacity` tasks are already buffered;
    ///   the buffer is left untouched
    pub fn enqueue(&self, task: Task) -> Result<(), QueueError> {
        if self.cancel.is_cancelled() {
            return Err(QueueError::Cancelled);
        }

        {
            let mut state = self.lock();
            if state.closed {
                return Err(QueueError::Cancelled);
            }
            if state.buf.len() >= self.capacity {
                return Err(QueueError::Full {
                    capacity: self.capacity,
                });
            }
            state.buf.push_back(task);
        }

        // ロック解放後に通知
        self.notify.notify_one();
        Ok(())
    }

    /// Take the oldest task, waiting until one is available.
    ///
    /// Returns `None` when the queue is closed and empty, or as soon as
    /// cancellation is signaled (buffered tasks are then abandoned).
    pub async fn dequeue(&self) -> Option<Task> {
        loop {
            // Register interest before looking at the buffer so a push or
            // close between the check and the wait is not missed.
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.cancel.is_cancelled() {
                return None;
            }

            let (task, more, closed) = {
                let mut state = self.lock();
                let task = state.buf.pop_front();
                (task, !state.buf.is_empty(), state.closed)
            };

            if let Some(task) = task {
                if more {
                    // pass the wake-up on to another idle worker
                    self.notify.notify_one();
                }
                return Some(task);
            }
            if closed {
                return None;
            }

            tokio::select! {
                _ = &mut notified => {}
                _ = self.cancel.cancelled() => return None,
            }
        }
    }

    /// Stop accepting tasks; already buffered tasks stay available to
    /// `dequeue`. Returns `false` if the queue was already closed.
    pub fn close(&self) -> bool {
        let first = {
            let mut state = self.lock();
            let first = !state.closed;
            state.closed = true;
            first
        };

        if first {
            debug!(remaining = self.len(), "task queue closed");
        }
        self.notify.notify_waiters();
        first
    }

    /// Remove and return every buffered task.
    pub fn drain(&self) -> Vec<Task> {
        self.lock().buf.drain(..).collect()
    }

    /// The cancellation signal this queue honors.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn stats(&self) -> QueueStats {
        let state = self.lock();
        QueueStats {
            queued: state.buf.len(),
            capacity: self.capacity,
            closed: state.closed,
        }
    }
}
