//! Mix Context - 混音引擎
//!
//! 叙述 ──────────────────────────────────────────┐
//!                                                 ├─ amix ─ WAV
//! 背景 ─ aresample ─ aloop ─ atrim ─ afade ───────┘
//!
//! 没有背景时直接把叙述编码为 WAV。

use super::amix::{amix, MixInput};
use super::errors::MixError;
use super::fade::FadeWindow;
use super::narration::NarrationTrack;
use super::settings::MixSettings;
use super::stage::{FilterChain, FilterStage};
use crate::domain::audio::{encode_wav, DecodedAudio, PcmTrack};

/// 一次混音的输出
#[derive(Debug, Clone)]
pub struct MixResult {
    /// 完整的 WAV 数据
    pub wav: Vec<u8>,
    pub frames: usize,
    pub sample_rate: u32,
    /// 是否混入了背景音乐
    pub background_applied: bool,
}

impl MixResult {
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / self.sample_rate as f64
    }
}

/// 混音引擎（无状态，可跨请求共享）
#[derive(Debug, Clone, Default)]
pub struct MixEngine {
    settings: MixSettings,
}

impl MixEngine {
    pub fn new(settings: MixSettings) -> Self {
        Self { settings }
    }

    /// 为背景音乐构建滤镜链，使其与叙述等长
    pub fn background_chain(&self, background_rate: u32, narration: &NarrationTrack) -> FilterChain {
        let frames = narration.frames();
        let mut chain = FilterChain::new();

        if background_rate != self.settings.output_sample_rate {
            chain = chain.then(FilterStage::Resample {
                to_rate: self.settings.output_sample_rate,
            });
        }

        chain = chain
            .then(FilterStage::Loop {
                until_frames: frames,
            })
            .then(FilterStage::Trim { frames });

        if let Some(window) = FadeWindow::plan(
            narration.duration_seconds(),
            self.settings.fade_out_secs,
            self.settings.short_fade,
        ) {
            chain = chain.then(FilterStage::FadeOut(window));
        }

        chain
    }

    /// 拼接片段并与可选背景混音，输出 WAV
    pub fn mix(
        &self,
        segments: &[DecodedAudio],
        background: Option<PcmTrack>,
    ) -> Result<MixResult, MixError> {
        let narration = NarrationTrack::concat(segments, self.settings.output_sample_rate);
        if narration.is_empty() {
            return Err(MixError::EmptyNarration);
        }

        let background = background.filter(|track| !track.is_empty());
        let background_applied = background.is_some();

        let samples = match background {
            None => narration.samples().to_vec(),
            Some(track) => {
                let chain = self.background_chain(track.sample_rate(), &narration);
                tracing::debug!(
                    filter = %chain,
                    narration_secs = narration.duration_seconds(),
                    background_secs = track.duration_seconds(),
                    "Applying background filter chain"
                );

                let processed = chain.apply(track);
                let mixed = amix(
                    MixInput::new(narration.to_track(), self.settings.narration_weight),
                    &[MixInput::new(processed, self.settings.background_weight)],
                    self.settings.dropout_transition_secs,
                );
                mixed.to_i16()
            }
        };

        let wav = encode_wav(&samples, self.settings.output_sample_rate)?;

        Ok(MixResult {
            wav,
            frames: samples.len(),
            sample_rate: self.settings.output_sample_rate,
            background_applied,
        })
    }
}
