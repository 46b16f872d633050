//! Task Registry Port - 生成任务状态管理
//!
//! 每种生成任务一个独立状态机，互不加锁、互不排斥。
//! 抽象接口在此定义，内存实现在 infrastructure/memory 层

use serde::{Deserialize, Serialize};

use crate::domain::project::{Chapter, Character, Idea, RankingResult};
use crate::domain::revision::AnalysisResult;

/// 任务种类
///
/// 每种任务独立运行，种类之间没有任何顺序关系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// 创意生成
    Idea,
    /// 大纲生成
    Outline,
    /// 角色生成
    Character,
    /// 写作辅助
    Assist,
    /// 正文检测
    Analysis,
    /// 榜单查询
    Ranking,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Idea => "idea",
            TaskKind::Outline => "outline",
            TaskKind::Character => "character",
            TaskKind::Assist => "assist",
            TaskKind::Analysis => "analysis",
            TaskKind::Ranking => "ranking",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 任务状态
///
/// Idle -> Running -> {Succeeded, Failed}，终态允许再次进入 Running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Idle => "idle",
            TaskStatus::Running => "running",
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Failed => "failed",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TaskStatus::Running)
    }
}

/// 任务产物，按种类取不同的结果类型
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutput {
    Idea(Idea),
    Outline(Vec<Chapter>),
    Character(Character),
    Assist(String),
    Analysis(AnalysisResult),
    Ranking(RankingResult),
}

impl TaskOutput {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskOutput::Idea(_) => TaskKind::Idea,
            TaskOutput::Outline(_) => TaskKind::Outline,
            TaskOutput::Character(_) => TaskKind::Character,
            TaskOutput::Assist(_) => TaskKind::Assist,
            TaskOutput::Analysis(_) => TaskKind::Analysis,
            TaskOutput::Ranking(_) => TaskKind::Ranking,
        }
    }
}

/// 单个任务槽的完整状态
///
/// 失败不清空先前成功的产物：界面在重新生成期间可以继续展示旧内容
#[derive(Debug, Clone, Default)]
pub struct TaskEntry {
    pub status: TaskStatus,
    /// 最近一次失败的错误消息（原样保留）
    pub error: Option<String>,
    /// 最近一次成功的产物
    pub output: Option<TaskOutput>,
    /// 该种类已发出的最新请求号
    pub latest_request: u64,
}

/// Task Registry Port
///
/// 同种任务允许重叠调用：begin 为每次调用发放单调递增的请求号，
/// complete/fail 只在请求号仍是最新时生效，过期响应被丢弃。
/// 远端调用本身不会被取消，只是结果不再可见
pub trait TaskRegistryPort: Send + Sync {
    /// 进入 Running，清空 error，保留旧 output，返回本次请求号
    fn begin(&self, kind: TaskKind) -> u64;

    /// 成功完成；仅当 `request_id` 仍是该种类最新请求时生效
    ///
    /// 返回结果是否被采纳
    fn complete(&self, kind: TaskKind, request_id: u64, output: TaskOutput) -> bool;

    /// 失败结束；仅当 `request_id` 仍是最新请求时生效，output 不动
    fn fail(&self, kind: TaskKind, request_id: u64, error: String) -> bool;

    /// 读取任务槽全量状态（未启动过的种类返回默认 Idle 槽）
    fn entry(&self, kind: TaskKind) -> TaskEntry;

    /// 读取任务状态
    fn status(&self, kind: TaskKind) -> TaskStatus;

    /// 读取最近一次成功产物
    fn output(&self, kind: TaskKind) -> Option<TaskOutput>;

    /// 读取最近一次失败消息
    fn error_message(&self, kind: TaskKind) -> Option<String>;

    /// 重置回 Idle，清空产物与错误
    fn reset(&self, kind: TaskKind);
}
