//! Project Context - 核心领域类型
//!
//! 创意、大纲章节、角色的数据结构，与生成服务的 JSON 线上格式对齐

use serde::{Deserialize, Serialize};

/// 预置小说分类（起点市场主流流派）
///
/// 仅作为输入预设，自定义分类以任意字符串传入
pub const GENRE_PRESETS: &[&str] = &[
    "仙侠/修真",
    "都市/系统",
    "科幻/诸天无限",
    "奇幻/西幻",
    "历史/架空",
    "游戏/虚拟网游",
];

/// 预置故事基调
pub const TONE_PRESETS: &[&str] = &[
    "打脸/爽文",
    "轻松/搞笑",
    "黑暗/杀伐果断",
    "慢热/传统",
    "权谋/智斗",
    "虐主/致郁",
];

/// 小说创意
///
/// 生成服务的产物，整体替换、不做局部修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// 书名
    pub title: String,
    /// 一句话核心看点/爽点
    pub hook: String,
    /// 金手指设定（系统、宝物、天赋等）
    pub goldfinger: String,
    /// 主要矛盾或最终目标
    pub main_conflict: String,
    /// 目标读者群体
    pub target_audience: String,
}

/// 章节节奏
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pacing {
    #[serde(rename = "快")]
    Fast,
    #[serde(rename = "中")]
    Medium,
    #[serde(rename = "慢")]
    Slow,
}

impl Pacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pacing::Fast => "快",
            Pacing::Medium => "中",
            Pacing::Slow => "慢",
        }
    }
}

impl std::fmt::Display for Pacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 大纲章节
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// 章节编号
    pub number: u32,
    /// 章节名
    pub title: String,
    /// 剧情摘要
    pub summary: String,
    /// 节奏
    pub pacing: Pacing,
    /// 本章关键事件/爽点
    pub key_event: String,
}

/// 角色设定
///
/// 线上格式使用 snake_case（cheat_ability），与持久化记录保持一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// 角色名字
    pub name: String,
    /// 角色定位（主角/反派/女主等）
    pub role: String,
    /// 角色原型/模板
    pub archetype: String,
    /// 性格描述
    pub personality: String,
    /// 背景故事
    pub backstory: String,
    /// 特殊能力/金手指（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheat_ability: Option<String>,
}

/// 榜单书目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingBook {
    pub rank: u32,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// 热度数据，如 "12万月票"
    pub heat: String,
    /// 简短剧情概括
    pub summary: String,
    /// 核心看点/爽点分析
    pub highlights: String,
    /// 封面图片 URL（可选，找不到则留空）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// 榜单分类（月票榜、畅销榜等）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingCategory {
    /// 榜单名称
    pub name: String,
    pub books: Vec<RankingBook>,
}

/// 榜单数据来源（搜索引用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSource {
    pub title: String,
    pub uri: String,
}

/// 榜单查询结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    pub categories: Vec<RankingCategory>,
    /// 当前市场流行趋势分析
    pub trend_analysis: String,
    /// 数据来源列表
    #[serde(default)]
    pub sources: Vec<RankingSource>,
}
