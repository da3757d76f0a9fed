//! Mix Context - 叙述拼接、背景滤镜链与混音

mod amix;
mod engine;
mod errors;
mod fade;
mod narration;
mod settings;
mod stage;

pub use amix::{amix, MixInput};
pub use engine::{MixEngine, MixResult};
pub use errors::MixError;
pub use fade::FadeWindow;
pub use narration::NarrationTrack;
pub use settings::{
    MixSettings, ShortFadePolicy, BACKGROUND_WEIGHT, DROPOUT_TRANSITION_SECS, FADE_OUT_SECS,
    NARRATION_WEIGHT,
};
pub use stage::{FilterChain, FilterStage};
