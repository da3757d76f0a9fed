//! radioplay - 广播剧混音服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Audio: PCM 缓冲、重采样、WAV 编码
//! - Mix: 叙述拼接、背景滤镜链、amix、混音引擎
//!
//! 应用层 (application/):
//! - Ports: 端口定义（AudioDecoder, Staging, BackgroundTrack, GenerativeModel）
//! - Commands: MixAudio / GenerateContent 命令处理器
//! - Workspace: 请求级临时工作区守卫
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: symphonia 解码器、文件工作区、背景音乐、Gemini 客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
