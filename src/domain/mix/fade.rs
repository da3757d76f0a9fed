//! Mix Context - 淡出窗口
//!
//! 淡出起点为 `T - fade`。当 `T < fade` 时起点被截到 0，
//! 之后的行为由 [`ShortFadePolicy`] 决定，这是唯一的分支点。

use super::settings::ShortFadePolicy;

/// 线性淡出窗口（秒）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeWindow {
    pub start_secs: f64,
    pub duration_secs: f64,
}

impl FadeWindow {
    /// 为总时长 `total_secs` 的音轨规划淡出窗口
    ///
    /// 返回 `None` 表示不淡出
    pub fn plan(total_secs: f64, fade_secs: f64, policy: ShortFadePolicy) -> Option<Self> {
        if fade_secs <= 0.0 || total_secs <= 0.0 {
            return None;
        }

        if total_secs >= fade_secs {
            return Some(Self {
                start_secs: total_secs - fade_secs,
                duration_secs: fade_secs,
            });
        }

        match policy {
            ShortFadePolicy::ClampStart => Some(Self {
                start_secs: 0.0,
                duration_secs: fade_secs,
            }),
            ShortFadePolicy::Compress => Some(Self {
                start_secs: 0.0,
                duration_secs: total_secs,
            }),
            ShortFadePolicy::Skip => None,
        }
    }

    /// 时刻 `t`（秒）处的增益，窗口之前为 1.0，窗口之后为 0.0
    pub fn gain_at(&self, t: f64) -> f32 {
        if t <= self.start_secs {
            return 1.0;
        }
        let progress = (t - self.start_secs) / self.duration_secs;
        (1.0 - progress).clamp(0.0, 1.0) as f32
    }
}
