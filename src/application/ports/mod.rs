//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_decoder;
mod background;
mod generative_model;
mod staging;

pub use audio_decoder::{AudioDecoderPort, DecodeError, RawAudio};
pub use background::{BackgroundTrackPort, BackgroundUnavailable};
pub use generative_model::{is_valid_model_name, GenerativeError, GenerativeModelPort};
pub use staging::{StagingError, StagingPort};
