//! Mix Handlers
//!
//! POST /api/mix-audio  `{ "audioSegments": [base64 WAV, ...] }` → audio/wav

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::{ApplicationError, DecodeError, MixAudio};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixAudioRequest {
    pub audio_segments: Option<Vec<String>>,
}

/// 解码一个 base64 片段，容忍 `data:audio/wav;base64,` 前缀与空白
fn decode_segment(index: usize, encoded: &str) -> Result<Vec<u8>, ApplicationError> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

    STANDARD.decode(compact.as_bytes()).map_err(|e| {
        ApplicationError::decode(index, DecodeError::Malformed(format!("invalid base64: {}", e)))
    })
}

pub async fn mix_audio(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MixAudioRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;

    let encoded = req.audio_segments.ok_or_else(|| {
        ApplicationError::validation("audioSegments must be a non-empty array")
    })?;
    if encoded.is_empty() {
        return Err(ApplicationError::validation("audioSegments must be a non-empty array").into());
    }

    let buffers = encoded
        .iter()
        .enumerate()
        .map(|(index, segment)| decode_segment(index, segment))
        .collect::<Result<Vec<_>, _>>()?;

    let result = state
        .mix_audio_handler
        .handle(MixAudio::from_buffers(buffers))
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, result.content_type),
            (header::CONTENT_LENGTH, result.audio_data.len().to_string()),
        ],
        result.audio_data,
    )
        .into_response())
}

/// CORS 预检（响应头由 CorsLayer 添加）
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
