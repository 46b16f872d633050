//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Generator、SnapshotStore、TaskRegistry）
//! - session: 项目会话（顶层编排组件）与自动保存句柄
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod session;

pub use error::ApplicationError;

pub use ports::{
    // Generator
    AssistContext,
    AssistMode,
    GeneratorError,
    GeneratorPort,
    // Snapshot store
    SnapshotStorePort,
    StoreError,
    // Task registry
    TaskEntry,
    TaskKind,
    TaskOutput,
    TaskRegistryPort,
    TaskStatus,
};

pub use session::{AutosaveHandle, ProjectSession, ProjectState, ReviewPanel, SaveRequest};
