//! Codec Adapter - 音频解码

mod symphonia_decoder;

pub use symphonia_decoder::SymphoniaDecoder;
