//! Mix Context - Errors

use thiserror::Error;

use crate::domain::audio::WavEncodeError;

#[derive(Debug, Error)]
pub enum MixError {
    #[error("Narration track is empty")]
    EmptyNarration,

    #[error("Failed to encode mixed audio: {0}")]
    Encoding(#[from] WavEncodeError),
}
