//! Symphonia Decoder - 基于 symphonia 的音频解码器
//!
//! 支持 WAV（语音片段）与 MP3（背景音乐）。输出交错 i16 PCM，
//! 并带上容器声明的参数，由调用方做格式校验。

use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioDecoderPort, DecodeError, RawAudio};

fn map_error(context: &str, err: SymphoniaError) -> DecodeError {
    match err {
        SymphoniaError::Unsupported(what) => {
            DecodeError::Unsupported(format!("{}: {}", context, what))
        }
        SymphoniaError::IoError(e) => DecodeError::Malformed(format!("{}: {}", context, e)),
        other => DecodeError::Malformed(format!("{}: {}", context, other)),
    }
}

/// symphonia 解码器（无状态）
#[derive(Debug, Clone, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }

    fn decode_stream(
        &self,
        mss: MediaSourceStream,
        extension: Option<&str>,
    ) -> Result<RawAudio, DecodeError> {
        let mut hint = Hint::new();
        if let Some(ext) = extension {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| map_error("probe failed", e))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| DecodeError::Malformed("no audio track found".to_string()))?;
        let track_id = track.id;
        let codec_params = track.codec_params.clone();

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| DecodeError::Malformed("unknown sample rate".to_string()))?;

        let mut decoder = symphonia::default::get_codecs()
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| map_error("decoder creation failed", e))?;

        let mut channels = codec_params.channels.map(|c| c.count() as u16);
        let mut samples: Vec<i16> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(map_error("packet read error", e)),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(SymphoniaError::DecodeError(e)) => {
                    tracing::warn!("Decode error (skipping packet): {}", e);
                    continue;
                }
                Err(e) => return Err(map_error("decode failed", e)),
            };

            let spec = *decoded.spec();
            let num_frames = decoded.frames();
            if channels.is_none() {
                channels = Some(spec.channels.count() as u16);
            }

            let mut sample_buf = SampleBuffer::<i16>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            let actual_samples = num_frames * spec.channels.count();
            samples.extend_from_slice(&sample_buf.samples()[..actual_samples]);
        }

        let channels =
            channels.ok_or_else(|| DecodeError::Malformed("unknown channel count".to_string()))?;

        Ok(RawAudio {
            samples,
            sample_rate,
            channels,
            bits_per_sample: codec_params.bits_per_sample,
            declared_frames: codec_params.n_frames,
        })
    }
}

impl AudioDecoderPort for SymphoniaDecoder {
    fn decode_file(&self, path: &Path) -> Result<RawAudio, DecodeError> {
        let file = File::open(path).map_err(|e| DecodeError::Io(e.to_string()))?;
        let size = file
            .metadata()
            .map_err(|e| DecodeError::Io(e.to_string()))?
            .len();
        if size == 0 {
            return Err(DecodeError::Empty);
        }

        let mss = MediaSourceStream::new(Box::new(file), Default::default());
        let extension = path.extension().and_then(|ext| ext.to_str());

        self.decode_stream(mss, extension)
    }
}
