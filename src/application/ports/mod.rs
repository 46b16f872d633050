//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod generator;
mod snapshot_store;
mod task_registry;

pub use generator::{AssistContext, AssistMode, GeneratorError, GeneratorPort};
pub use snapshot_store::{SnapshotStorePort, StoreError};
pub use task_registry::{TaskEntry, TaskKind, TaskOutput, TaskRegistryPort, TaskStatus};
