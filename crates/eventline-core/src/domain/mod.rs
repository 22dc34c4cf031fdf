//! Domain model: event documents, queue tasks, ids and error types.

pub mod errors;
pub mod event;
pub mod event_type;
pub mod ids;
pub mod task;

pub use errors::{
    CoordinatorError, InvalidEventType, QueueError, StoreError, SubmitError, UnknownAction,
};
pub use event::{Event, EventFilter, EventState, NewEvent};
pub use event_type::EventType;
pub use ids::EventId;
pub use task::{Action, Task};
