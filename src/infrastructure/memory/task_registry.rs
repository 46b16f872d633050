//! In-Memory Task Registry Implementation

use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{TaskEntry, TaskKind, TaskOutput, TaskRegistryPort, TaskStatus};

/// 内存任务注册表
///
/// 每种任务一个槽位。请求号在槽内单调递增，
/// 过期响应（请求号不再是最新）被丢弃而不是应用
pub struct InMemoryTaskRegistry {
    /// kind -> TaskEntry
    tasks: DashMap<TaskKind, TaskEntry>,
}

impl InMemoryTaskRegistry {
    pub fn new() -> Self {
        Self {
            tasks: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryTaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRegistryPort for InMemoryTaskRegistry {
    fn begin(&self, kind: TaskKind) -> u64 {
        let mut entry = self.tasks.entry(kind).or_default();
        entry.latest_request += 1;
        entry.status = TaskStatus::Running;
        // 上一次成功的产物保留到新结果返回，界面可继续展示旧内容
        entry.error = None;

        tracing::debug!(
            kind = %kind,
            request_id = entry.latest_request,
            "Task started"
        );
        entry.latest_request
    }

    fn complete(&self, kind: TaskKind, request_id: u64, output: TaskOutput) -> bool {
        let mut entry = self.tasks.entry(kind).or_default();
        if request_id != entry.latest_request {
            tracing::debug!(
                kind = %kind,
                request_id = request_id,
                latest_request = entry.latest_request,
                "Stale task result discarded"
            );
            return false;
        }

        entry.status = TaskStatus::Succeeded;
        entry.output = Some(output);
        entry.error = None;

        tracing::debug!(kind = %kind, request_id = request_id, "Task succeeded");
        true
    }

    fn fail(&self, kind: TaskKind, request_id: u64, error: String) -> bool {
        let mut entry = self.tasks.entry(kind).or_default();
        if request_id != entry.latest_request {
            tracing::debug!(
                kind = %kind,
                request_id = request_id,
                latest_request = entry.latest_request,
                "Stale task failure discarded"
            );
            return false;
        }

        entry.status = TaskStatus::Failed;
        entry.error = Some(error);
        // 失败不清空先前成功的产物

        tracing::debug!(kind = %kind, request_id = request_id, "Task failed");
        true
    }

    fn entry(&self, kind: TaskKind) -> TaskEntry {
        self.tasks
            .get(&kind)
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    fn status(&self, kind: TaskKind) -> TaskStatus {
        self.tasks
            .get(&kind)
            .map(|e| e.status)
            .unwrap_or_default()
    }

    fn output(&self, kind: TaskKind) -> Option<TaskOutput> {
        self.tasks.get(&kind).and_then(|e| e.output.clone())
    }

    fn error_message(&self, kind: TaskKind) -> Option<String> {
        self.tasks.get(&kind).and_then(|e| e.error.clone())
    }

    fn reset(&self, kind: TaskKind) {
        if let Some(mut entry) = self.tasks.get_mut(&kind) {
            let latest_request = entry.latest_request + 1;
            *entry = TaskEntry {
                // 请求号前进一格，重置前发出的在途请求返回时被丢弃
                latest_request,
                ..TaskEntry::default()
            };
        }
        tracing::debug!(kind = %kind, "Task reset");
    }
}
