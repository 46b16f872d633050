//! Session Layer - 项目会话编排
//!
//! 顶层组件：组合生成端口、任务注册表、快照存储与自动保存

mod autosave;
mod project_session;

pub use autosave::{AutosaveHandle, SaveRequest};
pub use project_session::{ProjectSession, ProjectState, ReviewPanel, MIN_ANALYSIS_CHARS};
