//! ProcessingSink port - where workers report task outcomes.
//!
//! Once a task is queued its caller is gone, so this sink is the only place
//! a processing failure is ever seen. Implementations must not block: they
//! run on the worker between two dequeues.

use crate::domain::{CoordinatorError, Task};

pub trait ProcessingSink: Send + Sync {
    fn processed(&self, worker_id: usize, task: &Task);

    fn failed(&self, worker_id: usize, task: &Task, error: &CoordinatorError);

    /// Task was still buffered when shutdown gave up waiting for the drain.
    fn abandoned(&self, task: &Task);
}
