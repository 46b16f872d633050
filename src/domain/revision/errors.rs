//! Revision Context - Errors

use thiserror::Error;

/// 文本修订错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RevisionError {
    /// 片段在当前正文中不存在（可能已被修改），调用方原文不变
    #[error("Snippet not found in document")]
    NotFound,

    /// 替换候选不在该建议的候选集内，属于调用方编程错误
    #[error("Replacement candidate not offered by this suggestion: {0}")]
    UnknownCandidate(String),
}
