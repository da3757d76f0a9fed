//! 线性重采样

/// 单声道线性插值重采样
///
/// 输出帧数为 `round(frames * to_rate / from_rate)`
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || from_rate == 0 || to_rate == 0 || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let frame_count = samples.len();
    let new_frame_count = (frame_count as f64 * ratio).round() as usize;
    let last = frame_count - 1;
    let mut resampled = Vec::with_capacity(new_frame_count);

    for i in 0..new_frame_count {
        let src_pos = i as f64 / ratio;
        let src_idx = (src_pos as usize).min(last);
        let frac = (src_pos - src_idx as f64).clamp(0.0, 1.0) as f32;

        let s0 = samples[src_idx];
        let s1 = samples[(src_idx + 1).min(last)];

        // 线性插值
        resampled.push(s0 + (s1 - s0) * frac);
    }

    resampled
}
