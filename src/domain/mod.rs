//! Domain Layer - 领域层
//!
//! 包含两个上下文:
//! - Audio Context: PCM 数据模型、重采样、WAV 编码
//! - Mix Context: 叙述拼接、背景滤镜链、混音引擎

pub mod audio;
pub mod mix;
