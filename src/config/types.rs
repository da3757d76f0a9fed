//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::mix::{MixSettings, ShortFadePolicy};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 混音配置
    #[serde(default)]
    pub mix: MixConfig,

    /// 生成模型代理配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体上限（字节）
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit() -> usize {
    50 * 1024 * 1024 // 50 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 混音配置
#[derive(Debug, Clone, Deserialize)]
pub struct MixConfig {
    /// 工作目录，相对的背景音乐路径以此为基准
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// 背景音乐文件，文件不存在时只输出叙述
    #[serde(default = "default_background_path")]
    pub background_path: PathBuf,

    /// 请求工作区根目录
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// 叙述短于淡出时长时的处理策略
    #[serde(default)]
    pub short_fade: ShortFadePolicy,
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_background_path() -> PathBuf {
    PathBuf::from("background.mp3")
}

pub(crate) fn default_staging_dir() -> PathBuf {
    std::env::temp_dir().join("radioplay")
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            working_dir: default_working_dir(),
            background_path: default_background_path(),
            staging_dir: default_staging_dir(),
            short_fade: ShortFadePolicy::default(),
        }
    }
}

impl MixConfig {
    /// 背景音乐的实际位置
    pub fn background_location(&self) -> PathBuf {
        if self.background_path.is_absolute() {
            self.background_path.clone()
        } else {
            self.working_dir.join(&self.background_path)
        }
    }

    /// 混音参数
    pub fn settings(&self) -> MixSettings {
        MixSettings::default().with_short_fade(self.short_fade)
    }
}

/// 生成模型代理配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// 逗号分隔的 API Key 列表
    #[serde(default)]
    pub api_keys: String,

    /// API 基础 URL
    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_gemini_timeout")]
    pub timeout_secs: u64,
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_keys: String::new(),
            base_url: default_gemini_url(),
            timeout_secs: default_gemini_timeout(),
        }
    }
}

impl GeminiConfig {
    /// 解析后的 Key 列表（去除空白与空项，保持顺序）
    pub fn keys(&self) -> Vec<String> {
        self.api_keys
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect()
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
