//! Project Context - 项目快照
//!
//! 持久化的唯一记录。字段名与历史线上格式保持一致
//! （camelCase，`lastModified` 为毫秒时间戳）

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{Character, Chapter, Idea};

/// 项目快照 - 单项目全量状态
///
/// 不变量:
/// - 进程内单实例，由 ProjectSession 独占修改
/// - 持久化为单条 JSON 记录，整体覆盖写入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// 当前创意（可能尚未生成）
    pub idea: Option<Idea>,
    /// 大纲章节
    #[serde(default)]
    pub outline: Vec<Chapter>,
    /// 角色列表
    #[serde(default)]
    pub characters: Vec<Character>,
    /// 正文
    #[serde(default)]
    pub content: String,
    /// 最后修改时间（Unix 毫秒）
    pub last_modified: i64,
}

impl ProjectSnapshot {
    /// 空项目快照
    pub fn empty() -> Self {
        Self {
            idea: None,
            outline: Vec::new(),
            characters: Vec::new(),
            content: String::new(),
            last_modified: now_millis(),
        }
    }

    /// 是否不含任何用户数据
    pub fn is_empty(&self) -> bool {
        self.idea.is_none()
            && self.outline.is_empty()
            && self.characters.is_empty()
            && self.content.is_empty()
    }
}

impl Default for ProjectSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// 当前 Unix 毫秒时间戳
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
