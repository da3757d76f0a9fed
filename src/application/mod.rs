//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（AudioDecoder、Staging、BackgroundTrack、GenerativeModel）
//! - commands: 命令及处理器
//! - workspace: 请求级临时工作区
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod workspace;

// Re-exports
pub use commands::{
    // Mix commands
    MixAudio,
    MixAudioResponse,
    SpeechSegment,
    // Generate commands
    GenerateContent,
    GenerateContentResponse,
    // Handlers
    handlers::{GenerateContentHandler, MixAudioHandler, SegmentDecoder},
};

pub use error::ApplicationError;

pub use ports::{
    // Audio decoder
    AudioDecoderPort,
    DecodeError,
    RawAudio,
    // Background track
    BackgroundTrackPort,
    BackgroundUnavailable,
    // Generative model
    GenerativeError,
    GenerativeModelPort,
    // Staging
    StagingError,
    StagingPort,
};

pub use workspace::RequestWorkspace;
