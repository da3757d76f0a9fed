//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. `GEMINI_API_KEYS` 环境变量
//! 2. 环境变量（前缀 `RADIOPLAY_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{default_staging_dir, AppConfig};

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

/// 部署平台惯用的 Key 列表变量名
const API_KEYS_ENV: &str = "GEMINI_API_KEYS";

/// 加载应用配置
///
/// # 环境变量示例
/// - `RADIOPLAY_SERVER__PORT=8080`
/// - `RADIOPLAY_MIX__WORKING_DIR=/srv/radioplay`
/// - `RADIOPLAY_MIX__SHORT_FADE=compress`
/// - `GEMINI_API_KEYS=key-a,key-b`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let staging_dir = default_staging_dir();

    let mut builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.body_limit_bytes", 50 * 1024 * 1024)?
        .set_default("mix.working_dir", ".")?
        .set_default("mix.background_path", "background.mp3")?
        .set_default("mix.staging_dir", staging_dir.to_string_lossy().to_string())?
        .set_default("mix.short_fade", "clamp_start")?
        .set_default("gemini.api_keys", "")?
        .set_default("gemini.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("gemini.timeout_secs", 120)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 层级分隔符: __ (双下划线)，例如 RADIOPLAY_MIX__BACKGROUND_PATH
    builder = builder
        .add_source(
            Environment::with_prefix("RADIOPLAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("gemini.api_keys", std::env::var(API_KEYS_ENV).ok())?;

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.server.body_limit_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "Body limit cannot be 0".to_string(),
        ));
    }

    if config.mix.background_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Background path cannot be empty".to_string(),
        ));
    }

    if config.gemini.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Gemini base URL cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Body Limit: {} bytes", config.server.body_limit_bytes);
    tracing::info!("Working Directory: {:?}", config.mix.working_dir);
    tracing::info!("Background Track: {:?}", config.mix.background_location());
    tracing::info!("Staging Directory: {:?}", config.mix.staging_dir);
    tracing::info!("Short Fade Policy: {}", config.mix.short_fade);
    tracing::info!("Gemini URL: {}", config.gemini.base_url);
    tracing::info!("Gemini API Keys: {}", config.gemini.keys().len());
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
