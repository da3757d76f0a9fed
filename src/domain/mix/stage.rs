//! Mix Context - 滤镜阶段
//!
//! 每个阶段都是 `PcmTrack -> PcmTrack` 的纯变换，
//! 按顺序组成 [`FilterChain`]，Display 输出 ffmpeg 风格的滤镜描述，便于日志排查。

use std::fmt;

use super::fade::FadeWindow;
use crate::domain::audio::{resample_linear, PcmTrack};

/// 单个滤镜阶段
#[derive(Debug, Clone, PartialEq)]
pub enum FilterStage {
    /// 重采样到目标采样率
    Resample { to_rate: u32 },
    /// 无限循环，物化到至少 `until_frames` 帧
    Loop { until_frames: usize },
    /// 截取 `[0, frames)`
    Trim { frames: usize },
    /// 线性淡出
    FadeOut(FadeWindow),
}

impl FilterStage {
    pub fn apply(&self, track: PcmTrack) -> PcmTrack {
        match self {
            FilterStage::Resample { to_rate } => {
                let resampled = resample_linear(track.samples(), track.sample_rate(), *to_rate);
                PcmTrack::new(resampled, *to_rate)
            }
            FilterStage::Loop { until_frames } => {
                if track.is_empty() || track.frames() >= *until_frames {
                    return track;
                }
                let sample_rate = track.sample_rate();
                let looped = track
                    .samples()
                    .iter()
                    .copied()
                    .cycle()
                    .take(*until_frames)
                    .collect();
                PcmTrack::new(looped, sample_rate)
            }
            FilterStage::Trim { frames } => {
                let sample_rate = track.sample_rate();
                let mut samples = track.into_samples();
                samples.truncate(*frames);
                PcmTrack::new(samples, sample_rate)
            }
            FilterStage::FadeOut(window) => {
                let mut track = track;
                let rate = track.sample_rate().max(1) as f64;
                for (i, sample) in track.samples_mut().iter_mut().enumerate() {
                    *sample *= window.gain_at(i as f64 / rate);
                }
                track
            }
        }
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStage::Resample { to_rate } => write!(f, "aresample={}", to_rate),
            FilterStage::Loop { until_frames } => {
                write!(f, "aloop=loop=-1:until={}", until_frames)
            }
            FilterStage::Trim { frames } => write!(f, "atrim=end_sample={}", frames),
            FilterStage::FadeOut(window) => write!(
                f,
                "afade=t=out:st={:.3}:d={:.3}",
                window.start_secs, window.duration_secs
            ),
        }
    }
}

/// 顺序执行的滤镜链
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, stage: FilterStage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn apply(&self, track: PcmTrack) -> PcmTrack {
        self.stages
            .iter()
            .fold(track, |track, stage| stage.apply(track))
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", stage)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(frames: usize) -> PcmTrack {
        PcmTrack::new((0..frames).map(|i| i as f32).collect(), 10)
    }

    #[test]
    fn test_loop_repeats_from_start() {
        let looped = FilterStage::Loop { until_frames: 7 }.apply(ramp(3));
        assert_eq!(looped.samples(), &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn test_loop_leaves_long_track_untouched() {
        let looped = FilterStage::Loop { until_frames: 2 }.apply(ramp(5));
        assert_eq!(looped.frames(), 5);
    }

    #[test]
    fn test_loop_on_empty_track() {
        let looped = FilterStage::Loop { until_frames: 10 }.apply(PcmTrack::new(vec![], 10));
        assert!(looped.is_empty());
    }

    #[test]
    fn test_trim_never_pads() {
        assert_eq!(FilterStage::Trim { frames: 2 }.apply(ramp(5)).frames(), 2);
        assert_eq!(FilterStage::Trim { frames: 8 }.apply(ramp(5)).frames(), 5);
    }

    #[test]
    fn test_fade_out_applies_window() {
        let track = PcmTrack::new(vec![1.0; 10], 10);
        let window = FadeWindow {
            start_secs: 0.5,
            duration_secs: 0.5,
        };
        let faded = FilterStage::FadeOut(window).apply(track);
        let samples = faded.samples();
        assert_eq!(&samples[..6], &[1.0; 6]);
        assert!((samples[8] - 0.4).abs() < 1e-6);
        assert!(samples[9] < samples[8]);
    }

    #[test]
    fn test_resample_changes_rate() {
        let resampled = FilterStage::Resample { to_rate: 20 }.apply(ramp(10));
        assert_eq!(resampled.sample_rate(), 20);
        assert_eq!(resampled.frames(), 20);
    }

    #[test]
    fn test_chain_runs_in_order_and_renders() {
        let chain = FilterChain::new()
            .then(FilterStage::Loop { until_frames: 6 })
            .then(FilterStage::Trim { frames: 4 });

        let out = chain.apply(ramp(3));
        assert_eq!(out.samples(), &[0.0, 1.0, 2.0, 0.0]);
        assert_eq!(chain.to_string(), "aloop=loop=-1:until=6,atrim=end_sample=4");
    }
}
