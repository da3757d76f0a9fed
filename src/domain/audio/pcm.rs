//! Audio Context - PCM 值对象
//!
//! - DecodedAudio: 单声道 i16 样本，来自一个已解码的语音片段
//! - PcmTrack: 单声道 f32 样本，滤镜链与混音的工作格式

/// 输出采样率（Hz），与 TTS 输出保持一致
pub const OUTPUT_SAMPLE_RATE: u32 = 24_000;

/// i16 样本 → f32（范围 [-1.0, 1.0)）
///
/// 除以 2 的幂，与 [`sample_to_i16`] 互逆，不损失精度
#[inline]
pub fn sample_to_f32(sample: i16) -> f32 {
    sample as f32 / 32768.0
}

/// f32 样本 → i16，超出范围时饱和截断
#[inline]
pub fn sample_to_i16(sample: f32) -> i16 {
    (sample * 32768.0)
        .round()
        .clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// 已解码的单声道音频
///
/// 不变量: `duration_seconds == samples.len() / sample_rate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl DecodedAudio {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
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

    /// 帧数（单声道下等于样本数）
    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn to_track(&self) -> PcmTrack {
        PcmTrack::new(
            self.samples.iter().copied().map(sample_to_f32).collect(),
            self.sample_rate,
        )
    }
}

/// 单声道浮点音轨
#[derive(Debug, Clone, PartialEq)]
pub struct PcmTrack {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl PcmTrack {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// 从交错的多声道 i16 样本构建，按帧取各声道平均值下混为单声道
    pub fn from_interleaved(samples: &[i16], channels: u16, sample_rate: u32) -> Self {
        let channels = channels.max(1) as usize;
        if channels == 1 {
            return Self::new(samples.iter().copied().map(sample_to_f32).collect(), sample_rate);
        }

        let mono = samples
            .chunks_exact(channels)
            .map(|frame| {
                let sum: f32 = frame.iter().copied().map(sample_to_f32).sum();
                sum / channels as f32
            })
            .collect();

        Self::new(mono, sample_rate)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
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

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// 量化为 i16 样本
    pub fn to_i16(&self) -> Vec<i16> {
        self.samples.iter().copied().map(sample_to_i16).collect()
    }
}
