//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod memory;
pub mod persistence;
pub mod worker;

pub use memory::InMemoryTaskRegistry;
pub use persistence::sled::SledSnapshotStore;
pub use worker::{AutosaveWorker, AutosaveWorkerConfig};
