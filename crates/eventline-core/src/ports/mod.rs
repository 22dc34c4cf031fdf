//! Ports - 抽象化レイヤー
//!
//! Seams between the coordinator runtime and the outside world: storage,
//! time, id generation and outcome reporting.

pub mod clock;
pub mod event_store;
pub mod id_generator;
pub mod processing_sink;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_store::EventStore;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::processing_sink::ProcessingSink;
