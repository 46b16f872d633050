//! 应用层错误定义
//!
//! 所有失败都被拦截在检测到它的组件边界上，对外永远是
//! "状态 + 一条错误消息"，不存在未处理的崩溃

use thiserror::Error;

use crate::application::ports::GeneratorError;
use crate::domain::revision::RevisionError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 前置条件不满足：在任何远端调用之前拒绝，任务不进入 Running
    #[error("{0}")]
    Precondition(String),

    /// 文本修订失败（片段不存在等），非致命
    #[error("Revision error: {0}")]
    Revision(#[from] RevisionError),

    /// 生成服务失败：该次调用终止，需显式重新发起
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// 创建前置条件错误
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// 是否为前置条件拒绝
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}
