//! Mix Context - 多输入混音
//!
//! 输出时长由第一路输入决定。各路按权重直接相加，不做归一化，
//! 量化为 i16 时饱和截断。

use std::f64::consts::FRAC_PI_2;

use crate::domain::audio::PcmTrack;

/// 一路混音输入
#[derive(Debug, Clone)]
pub struct MixInput {
    pub track: PcmTrack,
    pub weight: f32,
}

impl MixInput {
    pub fn new(track: PcmTrack, weight: f32) -> Self {
        Self { track, weight }
    }
}

/// 混音
///
/// `primary` 决定输出长度与采样率。`others` 中比输出短的输入，
/// 在其最后 `dropout_transition_secs` 秒内按等功率曲线（cos）降到 0，避免突然断开。
pub fn amix(primary: MixInput, others: &[MixInput], dropout_transition_secs: f64) -> PcmTrack {
    let sample_rate = primary.track.sample_rate();
    let output_frames = primary.track.frames();

    let mut mixed: Vec<f32> = primary
        .track
        .samples()
        .iter()
        .map(|&s| s * primary.weight)
        .collect();

    for input in others {
        let frames = input.track.frames().min(output_frames);
        let transition = if input.track.frames() < output_frames {
            let window = (dropout_transition_secs * sample_rate as f64).round() as usize;
            window.min(frames)
        } else {
            0
        };
        let transition_start = frames - transition;

        for (i, (out, &sample)) in mixed
            .iter_mut()
            .zip(input.track.samples())
            .take(frames)
            .enumerate()
        {
            let gain = if i >= transition_start {
                let progress = (i - transition_start + 1) as f64 / transition as f64;
                (progress * FRAC_PI_2).cos() as f32
            } else {
                1.0
            };
            *out += sample * input.weight * gain;
        }
    }

    PcmTrack::new(mixed, sample_rate)
}
