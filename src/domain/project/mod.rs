//! Project Context - 小说项目限界上下文
//!
//! 职责:
//! - 创意/大纲/角色/正文的数据结构
//! - 项目快照（持久化记录）
//! - 文本导出

mod export;
mod snapshot;
mod types;

pub use export::{export_file_name, export_to_txt};
pub use snapshot::{now_millis, ProjectSnapshot};
pub use types::{
    Chapter, Character, Idea, Pacing, RankingBook, RankingCategory, RankingResult, RankingSource,
    GENRE_PRESETS, TONE_PRESETS,
};
