//! Revision Context - 文本修订限界上下文
//!
//! 职责:
//! - 修改建议与下标稳定的建议集
//! - 片段定位（精确子串匹配）
//! - 单次替换应用

mod applier;
mod errors;
mod suggestion;

pub use applier::{apply, focus, locate, FocusTarget, FOCUS_MARGIN, LINE_HEIGHT};
pub use errors::RevisionError;
pub use suggestion::{AnalysisResult, Suggestion, SuggestionSet};
