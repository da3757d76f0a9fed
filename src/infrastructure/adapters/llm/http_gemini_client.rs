//! HTTP Gemini Client - 调用 Gemini generateContent REST API
//!
//! 实现 GenerativeModelPort trait
//!
//! POST {base_url}/v1beta/models/{model}:generateContent
//! Header: x-goog-api-key
//! Request: {"contents": [...], "generationConfig": {...}}
//! Response: JSON，原样返回

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{is_valid_model_name, GenerativeError, GenerativeModelPort};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// generateContent 请求体，只转发这两个字段
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<&'a Value>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_body(body: &'a Value) -> Self {
        Self {
            contents: body.get("contents").unwrap_or(&Value::Null),
            generation_config: body.get("generationConfig").filter(|v| !v.is_null()),
        }
    }
}

/// 从上游错误响应中提取 message（`{"error": {"message": ...}}`）
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

/// HTTP Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct HttpGeminiClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpGeminiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpGeminiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP Gemini 客户端
pub struct HttpGeminiClient {
    client: Client,
    config: HttpGeminiClientConfig,
}

impl HttpGeminiClient {
    pub fn new(config: HttpGeminiClientConfig) -> Result<Self, GenerativeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerativeError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generate_url(&self, model: &str) -> Result<String, GenerativeError> {
        if !is_valid_model_name(model) {
            return Err(GenerativeError::InvalidModel(model.to_string()));
        }
        Ok(format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        ))
    }
}

#[async_trait]
impl GenerativeModelPort for HttpGeminiClient {
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request_body: &Value,
    ) -> Result<Value, GenerativeError> {
        let url = self.generate_url(model)?;
        tracing::debug!(url = %url, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::from_body(request_body))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerativeError::Timeout
                } else if e.is_connect() {
                    GenerativeError::NetworkError(format!("Cannot connect to model API: {}", e))
                } else {
                    GenerativeError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerativeError::Http {
                status: status.as_u16(),
                message: upstream_message(&error_text),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| GenerativeError::InvalidResponse(e.to_string()))
    }
}
