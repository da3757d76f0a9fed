//! Application State
//!
//! 各路由共享的 Command Handlers

use crate::application::{GenerateContentHandler, MixAudioHandler};

pub struct AppState {
    pub mix_audio_handler: MixAudioHandler,
    pub generate_content_handler: GenerateContentHandler,
}

impl AppState {
    pub fn new(
        mix_audio_handler: MixAudioHandler,
        generate_content_handler: GenerateContentHandler,
    ) -> Self {
        Self {
            mix_audio_handler,
            generate_content_handler,
        }
    }
}
