//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `ZAOMENG_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `ZAOMENG_GENERATOR__API_KEY=sk-xxx`
/// - `ZAOMENG_GENERATOR__OFFLINE=true`
/// - `ZAOMENG_STORAGE__SNAPSHOT_PATH=/data/project.sled`
/// - `ZAOMENG_AUTOSAVE__DEBOUNCE_MS=3000`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("generator.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("generator.api_key", "")?
        .set_default("generator.model_flash", "gemini-3-flash-preview")?
        .set_default("generator.model_pro", "gemini-3-pro-preview")?
        .set_default("generator.timeout_secs", 120)?
        .set_default("generator.offline", false)?
        .set_default("storage.snapshot_path", "data/project.sled")?
        .set_default("autosave.debounce_ms", 5000)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    builder = builder.add_source(
        Environment::with_prefix("ZAOMENG")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.generator.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Generator base URL cannot be empty".to_string(),
        ));
    }

    // 在线模式必须提供 API Key
    if !config.generator.offline && config.generator.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "Generator API key is required unless offline mode is enabled".to_string(),
        ));
    }

    if config.storage.snapshot_path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Snapshot path cannot be empty".to_string(),
        ));
    }

    if config.autosave.debounce_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Autosave debounce interval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Generator URL: {}", config.generator.base_url);
    tracing::info!("Generator Models: {} / {}", config.generator.model_flash, config.generator.model_pro);
    tracing::info!("Generator Timeout: {}s", config.generator.timeout_secs);
    tracing::info!("Offline Mode: {}", config.generator.offline);
    tracing::info!("Snapshot Path: {}", config.storage.snapshot_path);
    tracing::info!("Autosave Debounce: {}ms", config.autosave.debounce_ms);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
