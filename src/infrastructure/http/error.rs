//! HTTP Error Handling
//!
//! 所有失败响应都使用真实的 HTTP 状态码，响应体为 `{ "error": ..., "details"?: ... }`

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 400
    BadRequest(String),
    /// 请求体被提取器拒绝（413、415 等），沿用提取器给出的状态码
    Rejected { status: StatusCode, message: String },
    /// 422，某个片段无法解码
    UnprocessableAudio { details: String },
    /// 500
    Internal {
        error: String,
        details: Option<String>,
    },
    /// 上游服务返回的状态码原样透传
    Upstream { status: StatusCode, message: String },
    /// 503
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::UnprocessableAudio { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { status, .. } => *status,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let response = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = status.as_u16(), error = %msg, "Bad request");
                ErrorResponse::new(msg, None)
            }
            ApiError::Rejected { message, .. } => {
                tracing::warn!(status = status.as_u16(), error = %message, "Request rejected");
                ErrorResponse::new(message, None)
            }
            ApiError::UnprocessableAudio { details } => {
                tracing::warn!(status = status.as_u16(), details = %details, "Audio segment rejected");
                ErrorResponse::new("Failed to decode audio segment", Some(details))
            }
            ApiError::Internal { error, details } => {
                tracing::error!(
                    status = status.as_u16(),
                    error = %error,
                    details = ?details,
                    "Internal server error"
                );
                ErrorResponse::new(error, details)
            }
            ApiError::Upstream { message, .. } => {
                tracing::warn!(status = status.as_u16(), error = %message, "Upstream error");
                ErrorResponse::new(message, None)
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(status = status.as_u16(), error = %msg, "Service unavailable");
                ErrorResponse::new(msg, None)
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::DecodeError { index, source } => ApiError::UnprocessableAudio {
                details: format!("segment {}: {}", index, source),
            },
            ApplicationError::MixError(msg) => ApiError::Internal {
                error: "Failed to mix audio".to_string(),
                details: Some(msg),
            },
            ApplicationError::StorageError(msg) => ApiError::Internal {
                error: "Failed to stage audio".to_string(),
                details: Some(msg),
            },
            ApplicationError::ConfigurationError(msg) => ApiError::Internal {
                error: msg,
                details: None,
            },
            ApplicationError::ExternalServiceError { status, message } => {
                match status.and_then(|s| StatusCode::from_u16(s).ok()) {
                    Some(status) => ApiError::Upstream { status, message },
                    None => ApiError::ServiceUnavailable(message),
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        match &e {
            JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
                ApiError::BadRequest(format!("Invalid JSON payload: {}", e.body_text()))
            }
            _ => ApiError::Rejected {
                status: e.status(),
                message: e.body_text(),
            },
        }
    }
}
