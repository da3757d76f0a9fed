//! 应用层 - 命令
//!
//! - MixAudio: 语音片段 + 背景音乐 → WAV
//! - GenerateContent: 剧本生成模型代理

mod generate_commands;
mod mix_commands;

pub mod handlers;

pub use generate_commands::*;
pub use mix_commands::*;
