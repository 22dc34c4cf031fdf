//! eventline-core
//!
//! Core building blocks for the eventline coordinator: typed events moving
//! through `Started -> Finished`, stored with optimistic concurrency, with
//! writes optionally buffered through a bounded queue and a worker pool.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, event_type, event, task, errors）
//! - **ports**: 抽象化レイヤー（EventStore, Clock, IdGenerator, ProcessingSink）
//! - **app**: アプリケーションロジック（coordinator, worker_pool, runtime）
//! - **queue**: bounded TaskQueue と CancelToken
//! - **impls**: 実装（InMemoryEventStore, TracingSink, CountingSink）
//! - **config**: RuntimeConfig
//! - **observability**: counters and queue snapshots

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod queue;

pub use app::{EventCoordinator, EventLifecycle, EventRuntime, Submitter};
pub use config::{ConfigError, RuntimeConfig};
