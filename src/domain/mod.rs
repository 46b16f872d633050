//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Project Context: 小说项目（创意/大纲/角色/正文/快照）
//! - Revision Context: 文本修订（建议定位与替换）

pub mod project;
pub mod revision;
