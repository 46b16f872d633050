//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 生成服务配置
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 自动保存配置
    #[serde(default)]
    pub autosave: AutosaveConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// 生成服务基础 URL
    #[serde(default = "default_generator_url")]
    pub base_url: String,

    /// API Key
    #[serde(default)]
    pub api_key: String,

    /// 快速模型
    #[serde(default = "default_model_flash")]
    pub model_flash: String,

    /// 高质量模型（大纲生成）
    #[serde(default = "default_model_pro")]
    pub model_pro: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_generator_timeout")]
    pub timeout_secs: u64,

    /// 离线模式：使用固定内容的 Fake 客户端，不访问网络
    #[serde(default)]
    pub offline: bool,
}

fn default_generator_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model_flash() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_model_pro() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_generator_timeout() -> u64 {
    120
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: default_generator_url(),
            api_key: String::new(),
            model_flash: default_model_flash(),
            model_pro: default_model_pro(),
            timeout_secs: default_generator_timeout(),
            offline: false,
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 项目快照数据库路径
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

fn default_snapshot_path() -> String {
    "data/project.sled".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

/// 自动保存配置
#[derive(Debug, Clone, Deserialize)]
pub struct AutosaveConfig {
    /// 防抖安静期（毫秒）
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    5000
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
