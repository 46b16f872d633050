//! Zaomeng - 网文创作助手核心引擎
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Project Context: 小说项目上下文（创意/大纲/角色/正文/快照）
//! - Revision Context: 文本修订上下文（建议定位与替换）
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Generator, SnapshotStore, TaskRegistry）
//! - Session: 项目会话（顶层编排）与自动保存句柄
//!
//! 基础设施层 (infrastructure/):
//! - Memory: TaskRegistry 内存实现
//! - Worker: AutosaveWorker 防抖快照写入
//! - Persistence: Sled 快照存储
//! - Adapters: 生成服务 HTTP/Fake 客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
