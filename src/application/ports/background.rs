//! Background Track Port - 背景音乐来源

use thiserror::Error;

use super::audio_decoder::DecodeError;
use crate::domain::audio::PcmTrack;

/// 背景音乐不可用（不会导致请求失败）
#[derive(Debug, Error)]
pub enum BackgroundUnavailable {
    #[error("Background track could not be decoded: {0}")]
    Decode(#[from] DecodeError),

    #[error("Background track contains no audio")]
    Empty,
}

/// Background Track Port
///
/// 阻塞调用。每次请求都重新加载，文件只读，可被并发请求共享
pub trait BackgroundTrackPort: Send + Sync {
    /// 加载背景音乐（单声道，保持原始采样率）
    ///
    /// - `Ok(None)`: 未配置或文件不存在
    /// - `Err(_)`: 文件存在但无法使用
    fn load(&self) -> Result<Option<PcmTrack>, BackgroundUnavailable>;
}
