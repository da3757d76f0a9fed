//! Mix Context - 混音参数

use serde::{Deserialize, Serialize};

use crate::domain::audio::OUTPUT_SAMPLE_RATE;

/// 叙述相对权重
pub const NARRATION_WEIGHT: f32 = 1.0;
/// 背景音乐相对权重
pub const BACKGROUND_WEIGHT: f32 = 0.2;
/// 背景音乐淡出时长（秒）
pub const FADE_OUT_SECS: f64 = 3.0;
/// 输入提前结束时的过渡时长（秒）
pub const DROPOUT_TRANSITION_SECS: f64 = 3.0;

/// 叙述短于淡出窗口时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortFadePolicy {
    /// 起点截到 0，时长保持不变（结尾处背景未完全静音）
    #[default]
    ClampStart,
    /// 起点截到 0，时长压缩为整段叙述（结尾处静音）
    Compress,
    /// 不做淡出
    Skip,
}

impl std::fmt::Display for ShortFadePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShortFadePolicy::ClampStart => write!(f, "clamp_start"),
            ShortFadePolicy::Compress => write!(f, "compress"),
            ShortFadePolicy::Skip => write!(f, "skip"),
        }
    }
}

impl std::str::FromStr for ShortFadePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clamp_start" => Ok(ShortFadePolicy::ClampStart),
            "compress" => Ok(ShortFadePolicy::Compress),
            "skip" => Ok(ShortFadePolicy::Skip),
            _ => Err(format!("Unknown short fade policy: {}", s)),
        }
    }
}

/// 混音参数
#[derive(Debug, Clone, PartialEq)]
pub struct MixSettings {
    pub output_sample_rate: u32,
    pub narration_weight: f32,
    pub background_weight: f32,
    pub fade_out_secs: f64,
    pub dropout_transition_secs: f64,
    pub short_fade: ShortFadePolicy,
}

impl Default for MixSettings {
    fn default() -> Self {
        Self {
            output_sample_rate: OUTPUT_SAMPLE_RATE,
            narration_weight: NARRATION_WEIGHT,
            background_weight: BACKGROUND_WEIGHT,
            fade_out_secs: FADE_OUT_SECS,
            dropout_transition_secs: DROPOUT_TRANSITION_SECS,
            short_fade: ShortFadePolicy::default(),
        }
    }
}

impl MixSettings {
    pub fn with_short_fade(mut self, policy: ShortFadePolicy) -> Self {
        self.short_fade = policy;
        self
    }
}
