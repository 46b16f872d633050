//! Sled-based Snapshot Store Implementation

use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{SnapshotStorePort, StoreError};
use crate::domain::project::{now_millis, ProjectSnapshot};

/// 快照记录的固定键
const SNAPSHOT_KEY: &str = "project:v1";

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledStoreConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledStoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/project.sled".to_string(),
        }
    }
}

/// Sled 快照存储
///
/// 单条 JSON 记录，整体覆盖写入，无版本迁移：
/// 记录缺失或无法解析一律回落到默认快照
pub struct SledSnapshotStore {
    db: Db,
}

impl SledSnapshotStore {
    /// 创建新的存储实例
    pub fn new(config: &SledStoreConfig) -> Result<Self, StoreError> {
        let db =
            sled::open(&config.db_path).map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        tracing::info!(db_path = %config.db_path, "SledSnapshotStore initialized");
        Ok(Self { db })
    }

    /// 打开指定路径的存储
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let config = SledStoreConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 刷新数据库
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStorePort for SledSnapshotStore {
    async fn persist(&self, snapshot: &ProjectSnapshot) -> Result<(), StoreError> {
        let mut record = snapshot.clone();
        record.last_modified = now_millis();

        let bytes = serde_json::to_vec(&record)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;

        self.db
            .insert(SNAPSHOT_KEY, bytes)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        tracing::debug!(
            last_modified = record.last_modified,
            content_len = record.content.len(),
            "Project snapshot persisted"
        );
        Ok(())
    }

    async fn load(&self) -> ProjectSnapshot {
        match self.db.get(SNAPSHOT_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!(error = %e, "Snapshot record unparseable, using defaults");
                    ProjectSnapshot::empty()
                }
            },
            Ok(None) => ProjectSnapshot::empty(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read snapshot record, using defaults");
                ProjectSnapshot::empty()
            }
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.db
            .remove(SNAPSHOT_KEY)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        tracing::info!("Project snapshot cleared");
        Ok(())
    }
}
