//! Segment Decoder - 语音片段解码
//!
//! 片段先落盘到请求工作区，再在 blocking 线程池中并行解码，
//! 结果按 index 顺序返回。任何一个片段失败都会中止整个请求。

use futures_util::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::SpeechSegment;
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioDecoderPort, DecodeError, RawAudio};
use crate::application::workspace::RequestWorkspace;
use crate::domain::audio::DecodedAudio;

pub struct SegmentDecoder {
    decoder: Arc<dyn AudioDecoderPort>,
}

impl SegmentDecoder {
    pub fn new(decoder: Arc<dyn AudioDecoderPort>) -> Self {
        Self { decoder }
    }

    /// 校验片段约束：单声道、16 位、时长非零、与容器声明的帧数一致
    pub fn validate(raw: RawAudio) -> Result<DecodedAudio, DecodeError> {
        if raw.channels != 1 {
            return Err(DecodeError::Unsupported(format!(
                "expected mono audio, found {} channels",
                raw.channels
            )));
        }

        if let Some(bits) = raw.bits_per_sample {
            if bits != 16 {
                return Err(DecodeError::Unsupported(format!(
                    "expected 16-bit PCM, found {}-bit",
                    bits
                )));
            }
        }

        if raw.sample_rate == 0 {
            return Err(DecodeError::Malformed("sample rate is zero".to_string()));
        }

        let frames = raw.frames();
        if frames == 0 {
            return Err(DecodeError::ZeroDuration);
        }

        if let Some(declared) = raw.declared_frames {
            if declared != frames as u64 {
                return Err(DecodeError::Malformed(format!(
                    "container declares {} frames but {} were decoded",
                    declared, frames
                )));
            }
        }

        Ok(DecodedAudio::new(raw.samples, raw.sample_rate))
    }

    /// 解码工作区中的一个文件
    pub async fn decode_staged(&self, path: PathBuf) -> Result<DecodedAudio, DecodeError> {
        let decoder = self.decoder.clone();
        let raw = tokio::task::spawn_blocking(move || decoder.decode_file(&path))
            .await
            .map_err(|e| DecodeError::Io(format!("decode task failed: {}", e)))??;

        Self::validate(raw)
    }

    /// 落盘并解码全部片段，按 index 升序返回
    pub async fn decode_all(
        &self,
        workspace: &RequestWorkspace,
        segments: &[SpeechSegment],
    ) -> Result<Vec<DecodedAudio>, ApplicationError> {
        let mut ordered: Vec<&SpeechSegment> = segments.iter().collect();
        ordered.sort_by_key(|segment| segment.index);

        let mut staged = Vec::with_capacity(ordered.len());
        for segment in ordered {
            if segment.encoded_bytes.is_empty() {
                return Err(ApplicationError::decode(segment.index, DecodeError::Empty));
            }
            let path = workspace
                .stage(
                    &format!("segment-{}.wav", segment.index),
                    &segment.encoded_bytes,
                )
                .await?;
            staged.push((segment.index, path));
        }

        // 全部完成后按顺序取第一个错误，保证错误报告确定
        join_all(staged.into_iter().map(|(index, path)| async move {
            self.decode_staged(path)
                .await
                .map_err(|e| ApplicationError::decode(index, e))
        }))
        .await
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(samples: Vec<i16>, channels: u16) -> RawAudio {
        let frames = samples.len() as u64 / channels.max(1) as u64;
        RawAudio {
            samples,
            sample_rate: 24_000,
            channels,
            bits_per_sample: Some(16),
            declared_frames: Some(frames),
        }
    }

    #[test]
    fn test_valid_mono_segment() {
        let decoded = SegmentDecoder::validate(raw(vec![1, 2, 3], 1)).unwrap();
        assert_eq!(decoded.samples(), &[1, 2, 3]);
        assert_eq!(decoded.sample_rate(), 24_000);
    }

    #[test]
    fn test_sample_rate_comes_from_container() {
        let mut audio = raw(vec![0; 16_000], 1);
        audio.sample_rate = 16_000;
        let decoded = SegmentDecoder::validate(audio).unwrap();
        assert!((decoded.duration_seconds() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stereo_rejected() {
        let result = SegmentDecoder::validate(raw(vec![0; 4], 2));
        assert!(matches!(result, Err(DecodeError::Unsupported(_))));
    }

    #[test]
    fn test_non_16_bit_rejected() {
        let mut audio = raw(vec![0; 4], 1);
        audio.bits_per_sample = Some(24);
        assert!(matches!(
            SegmentDecoder::validate(audio),
            Err(DecodeError::Unsupported(_))
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert!(matches!(
            SegmentDecoder::validate(raw(vec![], 1)),
            Err(DecodeError::ZeroDuration)
        ));
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let mut audio = raw(vec![0; 100], 1);
        audio.declared_frames = Some(48_000);
        assert!(matches!(
            SegmentDecoder::validate(audio),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let mut audio = raw(vec![0; 10], 1);
        audio.sample_rate = 0;
        assert!(matches!(
            SegmentDecoder::validate(audio),
            Err(DecodeError::Malformed(_))
        ));
    }
}
