//! Snapshot Store Port - 项目快照持久化抽象
//!
//! 单条记录、固定键、整体覆盖写入。
//! 读取永不失败：记录缺失或无法解析时返回默认快照

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::project::ProjectSnapshot;

/// 快照存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Snapshot Store Port
///
/// 持久化失败由调用方记录日志后吞掉，永不阻塞编辑
#[async_trait]
pub trait SnapshotStorePort: Send + Sync {
    /// 写入快照，覆盖先前记录
    async fn persist(&self, snapshot: &ProjectSnapshot) -> Result<(), StoreError>;

    /// 读取快照
    ///
    /// 记录缺失或字节无法解析时返回默认快照，解析失败不向调用方传播
    async fn load(&self) -> ProjectSnapshot;

    /// 删除记录
    ///
    /// 内存状态的重置由调用方自行负责
    async fn clear(&self) -> Result<(), StoreError>;
}
