//! Mix Commands - 混音命令

/// 一句台词的语音
#[derive(Debug, Clone)]
pub struct SpeechSegment {
    /// 在叙述中的位置（从 0 开始，决定拼接顺序）
    pub index: usize,
    /// 编码后的音频（单声道 16 位 PCM WAV）
    pub encoded_bytes: Vec<u8>,
}

/// 混音命令
#[derive(Debug, Clone)]
pub struct MixAudio {
    pub segments: Vec<SpeechSegment>,
}

impl MixAudio {
    /// 按给定顺序分配 index
    pub fn from_buffers(buffers: Vec<Vec<u8>>) -> Self {
        let segments = buffers
            .into_iter()
            .enumerate()
            .map(|(index, encoded_bytes)| SpeechSegment {
                index,
                encoded_bytes,
            })
            .collect();
        Self { segments }
    }
}

/// 混音响应
#[derive(Debug, Clone)]
pub struct MixAudioResponse {
    pub audio_data: Vec<u8>,
    pub content_type: String,
    pub duration_seconds: f64,
    pub background_applied: bool,
}
