//! Mix Command Handlers
//!
//! 校验 → 打开工作区 → 解码片段 → 加载背景 → 混音编码 → 释放工作区

use std::sync::Arc;

use super::segment_decoder::SegmentDecoder;
use crate::application::commands::{MixAudio, MixAudioResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioDecoderPort, BackgroundTrackPort, StagingPort};
use crate::application::workspace::RequestWorkspace;
use crate::domain::audio::PcmTrack;
use crate::domain::mix::{MixEngine, MixSettings};

/// MixAudio Handler
pub struct MixAudioHandler {
    staging: Arc<dyn StagingPort>,
    segment_decoder: SegmentDecoder,
    background: Arc<dyn BackgroundTrackPort>,
    engine: Arc<MixEngine>,
}

impl MixAudioHandler {
    pub fn new(
        staging: Arc<dyn StagingPort>,
        decoder: Arc<dyn AudioDecoderPort>,
        background: Arc<dyn BackgroundTrackPort>,
        settings: MixSettings,
    ) -> Self {
        Self {
            staging,
            segment_decoder: SegmentDecoder::new(decoder),
            background,
            engine: Arc::new(MixEngine::new(settings)),
        }
    }

    pub async fn handle(&self, command: MixAudio) -> Result<MixAudioResponse, ApplicationError> {
        if command.segments.is_empty() {
            return Err(ApplicationError::validation(
                "audioSegments must contain at least one segment",
            ));
        }

        let workspace = RequestWorkspace::open(self.staging.clone()).await?;
        let request_id = workspace.request_id();

        tracing::info!(
            request_id = %request_id,
            segments = command.segments.len(),
            "Mixing audio"
        );

        let decoded = self
            .segment_decoder
            .decode_all(&workspace, &command.segments)
            .await?;

        let background = self.load_background().await;

        let engine = self.engine.clone();
        let result = tokio::task::spawn_blocking(move || engine.mix(&decoded, background))
            .await
            .map_err(|e| ApplicationError::MixError(format!("mix task failed: {}", e)))??;

        tracing::info!(
            request_id = %request_id,
            duration_secs = result.duration_seconds(),
            background = result.background_applied,
            size = result.wav.len(),
            "Audio mixed"
        );

        Ok(MixAudioResponse {
            duration_seconds: result.duration_seconds(),
            background_applied: result.background_applied,
            audio_data: result.wav,
            content_type: "audio/wav".to_string(),
        })
    }

    /// 加载背景音乐，失败时降级为纯叙述
    async fn load_background(&self) -> Option<PcmTrack> {
        let background = self.background.clone();
        match tokio::task::spawn_blocking(move || background.load()).await {
            Ok(Ok(Some(track))) => Some(track),
            Ok(Ok(None)) => None,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Background track unavailable, mixing narration only");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Background loading task failed, mixing narration only");
                None
            }
        }
    }
}
