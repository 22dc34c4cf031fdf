//! Queue module: the bounded task buffer between callers and workers, and
//! the cancellation signal it shares with the worker pool.

mod bounded;
mod cancel;

pub use bounded::TaskQueue;
pub use cancel::CancelToken;
