//! Mix Context - 叙述音轨
//!
//! 不变量:
//! - 片段按 index 顺序首尾相接，没有间隙也不会重排
//! - 总时长 == 各片段时长之和（采样率一致时逐样本相等）

use crate::domain::audio::{resample_linear, sample_to_i16, DecodedAudio, PcmTrack};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationTrack {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl NarrationTrack {
    /// 按顺序拼接片段，采样率不同的片段先重采样到 `sample_rate`
    pub fn concat(segments: &[DecodedAudio], sample_rate: u32) -> Self {
        let capacity = segments
            .iter()
            .filter(|s| s.sample_rate() == sample_rate)
            .map(DecodedAudio::frames)
            .sum();
        let mut samples = Vec::with_capacity(capacity);

        for segment in segments {
            if segment.sample_rate() == sample_rate {
                samples.extend_from_slice(segment.samples());
            } else {
                let track = segment.to_track();
                let resampled = resample_linear(track.samples(), track.sample_rate(), sample_rate);
                samples.extend(resampled.into_iter().map(sample_to_i16));
            }
        }

        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 叙述总时长 T（秒）
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn to_track(&self) -> PcmTrack {
        DecodedAudio::new(self.samples.clone(), self.sample_rate).to_track()
    }
}
