//! Audio Decoder Port - 音频解码抽象
//!
//! 将容器格式（WAV、MP3 等）解码为交错的 i16 PCM，具体实现在 infrastructure/adapters 层

use std::path::Path;
use thiserror::Error;

/// 解码错误
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Audio payload is empty")]
    Empty,

    #[error("Malformed audio: {0}")]
    Malformed(String),

    #[error("Unsupported audio: {0}")]
    Unsupported(String),

    #[error("Audio has zero duration")]
    ZeroDuration,

    #[error("IO error: {0}")]
    Io(String),
}

/// 解码后的原始音频（尚未做任何格式约束）
#[derive(Debug, Clone)]
pub struct RawAudio {
    /// 交错排列的样本
    pub samples: Vec<i16>,
    /// 容器声明的采样率
    pub sample_rate: u32,
    /// 声道数
    pub channels: u16,
    /// 容器声明的位深度
    pub bits_per_sample: Option<u32>,
    /// 容器声明的帧数
    pub declared_frames: Option<u64>,
}

impl RawAudio {
    /// 实际解码出的帧数
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }
}

/// Audio Decoder Port
///
/// 解码是 CPU 密集的阻塞操作，调用方负责放到 blocking 线程池执行
pub trait AudioDecoderPort: Send + Sync {
    /// 解码指定文件
    fn decode_file(&self, path: &Path) -> Result<RawAudio, DecodeError>;
}
