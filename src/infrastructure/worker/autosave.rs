//! Autosave Worker - Debounced Snapshot Writer
//!
//! 后台任务处理器，从队列消费保存请求。
//! 防抖是单个可重置的延迟动作，不是队列：任一时刻最多挂起一次写入，
//! 新的变更会撤销并替换挂起的那次

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

use crate::application::ports::SnapshotStorePort;
use crate::application::session::SaveRequest;
use crate::domain::project::ProjectSnapshot;

/// Worker 配置
#[derive(Debug, Clone)]
pub struct AutosaveWorkerConfig {
    /// 安静期时长（毫秒）：最后一次变更后经过这么久才落盘
    pub debounce_ms: u64,
}

impl Default for AutosaveWorkerConfig {
    fn default() -> Self {
        Self { debounce_ms: 5000 }
    }
}

/// 自动保存 Worker
///
/// 一串连续变更只产生一次写入，发生在最后一次变更的安静期之后
pub struct AutosaveWorker {
    config: AutosaveWorkerConfig,
    queue_receiver: mpsc::Receiver<SaveRequest>,
    store: Arc<dyn SnapshotStorePort>,
}

impl AutosaveWorker {
    pub fn new(
        config: AutosaveWorkerConfig,
        queue_receiver: mpsc::Receiver<SaveRequest>,
        store: Arc<dyn SnapshotStorePort>,
    ) -> Self {
        Self {
            config,
            queue_receiver,
            store,
        }
    }

    /// 启动 Worker
    pub async fn run(mut self) {
        tracing::info!(debounce_ms = self.config.debounce_ms, "AutosaveWorker started");

        let interval = Duration::from_millis(self.config.debounce_ms);
        let mut pending: Option<ProjectSnapshot> = None;
        let mut deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                message = self.queue_receiver.recv() => match message {
                    Some(SaveRequest::Debounced(snapshot)) => {
                        // 替换待写快照并重置计时：一次只挂起一个写入
                        pending = Some(snapshot);
                        deadline = Some(Instant::now() + interval);
                    }
                    Some(SaveRequest::Immediate(snapshot)) => {
                        pending = None;
                        deadline = None;
                        Self::persist(self.store.as_ref(), &snapshot).await;
                    }
                    None => break,
                },
                _ = tokio::time::sleep_until(
                    deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(86400))
                ), if deadline.is_some() => {
                    deadline = None;
                    if let Some(snapshot) = pending.take() {
                        Self::persist(self.store.as_ref(), &snapshot).await;
                    }
                }
            }
        }

        // 队列关闭：挂起的快照在退出前落盘
        if let Some(snapshot) = pending.take() {
            Self::persist(self.store.as_ref(), &snapshot).await;
        }

        tracing::info!("AutosaveWorker stopped");
    }

    /// 落盘一次；失败只记录日志，不打扰编辑
    async fn persist(store: &dyn SnapshotStorePort, snapshot: &ProjectSnapshot) {
        if let Err(e) = store.persist(snapshot).await {
            tracing::warn!(error = %e, "Failed to persist project snapshot");
        } else {
            tracing::debug!("Project snapshot saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::StoreError;
    use crate::application::session::AutosaveHandle;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录每次写入时刻的测试存储
    #[derive(Default)]
    struct RecordingStore {
        writes: Mutex<Vec<(Instant, String)>>,
    }

    impl RecordingStore {
        fn writes(&self) -> Vec<(Instant, String)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SnapshotStorePort for RecordingStore {
        async fn persist(&self, snapshot: &ProjectSnapshot) -> Result<(), StoreError> {
            self.writes
                .lock()
                .unwrap()
                .push((Instant::now(), snapshot.content.clone()));
            Ok(())
        }

        async fn load(&self) -> ProjectSnapshot {
            ProjectSnapshot::empty()
        }

        async fn clear(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn snapshot_with(content: &str) -> ProjectSnapshot {
        let mut snapshot = ProjectSnapshot::empty();
        snapshot.content = content.to_string();
        snapshot
    }

    fn spawn_worker(
        debounce_ms: u64,
    ) -> (AutosaveHandle, Arc<RecordingStore>, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(100);
        let store = Arc::new(RecordingStore::default());
        let worker = AutosaveWorker::new(
            AutosaveWorkerConfig { debounce_ms },
            rx,
            store.clone(),
        );
        let join = tokio::spawn(worker.run());
        (AutosaveHandle::new(tx), store, join)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_single_write() {
        let start = Instant::now();
        let (handle, store, _join) = spawn_worker(5000);

        // t=0, t=1000, t=4000 三次变更
        handle.schedule(snapshot_with("v1"));
        tokio::time::sleep(Duration::from_millis(1000)).await;
        handle.schedule(snapshot_with("v2"));
        tokio::time::sleep(Duration::from_millis(3000)).await;
        handle.schedule(snapshot_with("v3"));

        tokio::time::sleep(Duration::from_millis(20_000)).await;

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        // 最后一次变更（t=4000）之后 5000ms，即 t=9000
        assert_eq!(writes[0].0.duration_since(start), Duration::from_millis(9000));
        assert_eq!(writes[0].1, "v3");
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_mutation_saves_after_quiet_period() {
        let start = Instant::now();
        let (handle, store, _join) = spawn_worker(5000);

        handle.schedule(snapshot_with("only"));
        tokio::time::sleep(Duration::from_millis(10_000)).await;

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0.duration_since(start), Duration::from_millis(5000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_now_bypasses_timer_and_disarms() {
        let start = Instant::now();
        let (handle, store, _join) = spawn_worker(5000);

        handle.schedule(snapshot_with("debounced"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.save_now(snapshot_with("explicit"));

        tokio::time::sleep(Duration::from_millis(20_000)).await;

        // 显式保存立即落盘，同时撤销挂起的防抖写入
        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1, "explicit");
        assert_eq!(writes[0].0.duration_since(start), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_snapshot_flushed_on_shutdown() {
        let (handle, store, join) = spawn_worker(5000);

        handle.schedule(snapshot_with("unsaved"));
        tokio::time::sleep(Duration::from_millis(100)).await;

        drop(handle);
        join.await.unwrap();

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1, "unsaved");
    }
}
