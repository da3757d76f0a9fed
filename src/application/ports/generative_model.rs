//! Generative Model Port - 剧本生成模型抽象
//!
//! 对外部生成式模型 API（Gemini generateContent）的抽象，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// 生成模型错误
#[derive(Debug, Error)]
pub enum GenerativeError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid model name: {0}")]
    InvalidModel(String),
}

/// 模型名会被拼进 URL 路径，只接受 `[A-Za-z0-9._-]`
pub fn is_valid_model_name(model: &str) -> bool {
    !model.is_empty()
        && model
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}

impl GenerativeError {
    /// 上游返回的 HTTP 状态码
    pub fn http_status(&self) -> Option<u16> {
        match self {
            GenerativeError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 是否为配额/限流错误（429 或 403），可换下一个 key 重试
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self.http_status(), Some(429) | Some(403))
    }
}

/// Generative Model Port
#[async_trait]
pub trait GenerativeModelPort: Send + Sync {
    /// 使用指定 API key 调用模型，返回上游 JSON 响应
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request_body: &Value,
    ) -> Result<Value, GenerativeError>;
}
