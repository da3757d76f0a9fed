//! Audio Context - PCM 数据模型、重采样与 WAV 编码

mod pcm;
mod resample;
mod wav;

pub use pcm::{sample_to_f32, sample_to_i16, DecodedAudio, PcmTrack, OUTPUT_SAMPLE_RATE};
pub use resample::resample_linear;
pub use wav::{encode_wav, WavEncodeError, WAV_HEADER_LEN};
