//! Autosave Handle - 自动保存入队端
//!
//! 会话每次状态变更调用 `schedule`，由后台 AutosaveWorker
//! 以单个可重置的防抖计时器收敛为一次写入

use tokio::sync::mpsc;

use crate::domain::project::ProjectSnapshot;

/// 自动保存请求
#[derive(Debug)]
pub enum SaveRequest {
    /// 防抖保存：替换待写快照并重置安静期计时
    Debounced(ProjectSnapshot),
    /// 立即保存：绕过计时器，同时撤销已挂起的防抖写入
    Immediate(ProjectSnapshot),
}

/// 自动保存句柄
///
/// 入队失败只记录日志，持久化问题永不阻塞编辑
#[derive(Debug, Clone)]
pub struct AutosaveHandle {
    sender: mpsc::Sender<SaveRequest>,
}

impl AutosaveHandle {
    pub fn new(sender: mpsc::Sender<SaveRequest>) -> Self {
        Self { sender }
    }

    /// 观察到一次状态变更
    pub fn schedule(&self, snapshot: ProjectSnapshot) {
        if let Err(e) = self.sender.try_send(SaveRequest::Debounced(snapshot)) {
            tracing::warn!(error = %e, "Failed to enqueue autosave");
        }
    }

    /// 显式保存，立即落盘
    pub fn save_now(&self, snapshot: ProjectSnapshot) {
        if let Err(e) = self.sender.try_send(SaveRequest::Immediate(snapshot)) {
            tracing::warn!(error = %e, "Failed to enqueue immediate save");
        }
    }
}
