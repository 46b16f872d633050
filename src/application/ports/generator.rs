//! Generator Port - 生成服务抽象
//!
//! 定义对外部生成服务（创意/大纲/角色/续写/检测/榜单）的抽象接口，
//! 具体实现在 infrastructure/adapters 层。
//! 所有调用视为不透明、可能缓慢、可能失败，核心不假设其延迟或重试行为

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::project::{Chapter, Character, Idea, RankingResult};
use crate::domain::revision::AnalysisResult;

/// 生成服务错误
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// 写作辅助模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistMode {
    /// 智能续写
    Continue,
    /// 文笔润色
    Polish,
    /// 场景/打斗描写
    Describe,
}

impl AssistMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistMode::Continue => "continue",
            AssistMode::Polish => "polish",
            AssistMode::Describe => "describe",
        }
    }
}

impl std::fmt::Display for AssistMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 写作辅助的只读上下文（创意/角色/大纲）
///
/// 生成服务只读取，永不修改
#[derive(Debug, Clone, Default)]
pub struct AssistContext {
    pub idea: Option<Idea>,
    pub characters: Vec<Character>,
    pub outline: Vec<Chapter>,
}

/// Generator Port
///
/// 外部生成服务的抽象接口
#[async_trait]
pub trait GeneratorPort: Send + Sync {
    /// 生成小说创意
    ///
    /// 分类或基调为空时以描述性错误拒绝
    async fn generate_idea(&self, genre: &str, tone: &str) -> Result<Idea, GeneratorError>;

    /// 为创意生成大纲章节
    async fn generate_outline(&self, idea: &Idea) -> Result<Vec<Chapter>, GeneratorError>;

    /// 生成角色设定，可选地参考现有大纲
    async fn generate_character(
        &self,
        role: &str,
        genre: &str,
        outline: Option<&[Chapter]>,
    ) -> Result<Character, GeneratorError>;

    /// 写作辅助：续写/润色/描写
    async fn assist_writing(
        &self,
        document: &str,
        mode: AssistMode,
        context: &AssistContext,
    ) -> Result<String, GeneratorError>;

    /// 检测正文的 "AI 味" 并产出修改建议
    async fn analyze(&self, document: &str) -> Result<AnalysisResult, GeneratorError>;

    /// 联网获取榜单数据与趋势分析
    async fn fetch_rankings(&self) -> Result<RankingResult, GeneratorError>;
}
