//! Impls - ports の実装
//!
//! - **InMemoryEventStore**: EventStore for development and tests
//! - **TracingSink** / **CountingSink**: ProcessingSink implementations
//!
//! Production stores live in their own crates and only need to implement
//! `ports::EventStore`.

pub mod inmem_store;
pub mod sinks;

pub use self::inmem_store::InMemoryEventStore;
pub use self::sinks::{CountingSink, TracingSink};
