//! Gemini Handlers
//!
//! POST /api/gemini  `{ "model": ..., "requestBody": { "contents": ..., "generationConfig"?: ... } }`

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::application::{ApplicationError, GenerateContent};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

const MISSING_FIELDS: &str = "Missing model or requestBody in payload.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub model: Option<String>,
    pub request_body: Option<Value>,
}

pub async fn generate_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GeminiRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = payload?;

    let (model, request_body) = match (req.model, req.request_body) {
        (Some(model), Some(body)) if !model.trim().is_empty() && !body.is_null() => (model, body),
        _ => return Err(ApplicationError::validation(MISSING_FIELDS).into()),
    };

    let response = state
        .generate_content_handler
        .handle(GenerateContent {
            model,
            request_body,
        })
        .await?;

    Ok(Json(response.body))
}
