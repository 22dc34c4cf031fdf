//! App - アプリケーション層
//!
//! # 主要コンポーネント
//! - **EventCoordinator**: Started → Finished の状態遷移（validation + optimistic concurrency）
//! - **WorkerPool**: TaskQueue を消費して coordinator を呼ぶワーカー群
//! - **EventRuntime**: queue + worker pool の組み立てと graceful shutdown

pub mod coordinator;
pub mod runtime;
pub mod worker_pool;

pub use self::coordinator::{EventCoordinator, EventLifecycle, MAX_LIST_LIMIT};
pub use self::runtime::{EventRuntime, Submitter};
pub use self::worker_pool::WorkerPool;
