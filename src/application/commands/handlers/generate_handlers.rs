//! Generate Command Handlers
//!
//! 按顺序尝试每个 API Key，遇到配额/权限错误（429/403）时切换下一个。

use std::sync::Arc;

use crate::application::commands::{GenerateContent, GenerateContentResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{is_valid_model_name, GenerativeModelPort};

/// 日志中只保留 Key 的前几个字符
const KEY_PREFIX_LEN: usize = 5;

fn key_prefix(key: &str) -> &str {
    match key.char_indices().nth(KEY_PREFIX_LEN) {
        Some((idx, _)) => &key[..idx],
        None => key,
    }
}

/// GenerateContent Handler
pub struct GenerateContentHandler {
    client: Arc<dyn GenerativeModelPort>,
    api_keys: Vec<String>,
}

impl GenerateContentHandler {
    pub fn new(client: Arc<dyn GenerativeModelPort>, api_keys: Vec<String>) -> Self {
        Self { client, api_keys }
    }

    pub async fn handle(
        &self,
        command: GenerateContent,
    ) -> Result<GenerateContentResponse, ApplicationError> {
        if command.model.trim().is_empty() || command.request_body.is_null() {
            return Err(ApplicationError::validation(
                "Missing model or requestBody in payload.",
            ));
        }

        if !is_valid_model_name(&command.model) {
            return Err(ApplicationError::validation(format!(
                "Invalid model name: {}",
                command.model
            )));
        }

        if self.api_keys.is_empty() {
            return Err(ApplicationError::ConfigurationError(
                "Server configuration error: No API keys provided.".to_string(),
            ));
        }

        let mut last_error = None;

        for (attempt, key) in self.api_keys.iter().enumerate() {
            tracing::debug!(
                model = %command.model,
                attempt = attempt + 1,
                key = key_prefix(key),
                "Calling generative model"
            );

            match self
                .client
                .generate_content(key, &command.model, &command.request_body)
                .await
            {
                Ok(body) => {
                    tracing::info!(
                        model = %command.model,
                        attempt = attempt + 1,
                        "Generative model call succeeded"
                    );
                    return Ok(GenerateContentResponse { body });
                }
                Err(e) if e.is_quota_exhausted() => {
                    tracing::warn!(
                        key = key_prefix(key),
                        error = %e,
                        "API key rejected, trying next key"
                    );
                    last_error = Some(e);
                }
                Err(e) => {
                    tracing::error!(
                        model = %command.model,
                        error = %e,
                        "Generative model call failed"
                    );
                    return Err(ApplicationError::ExternalServiceError {
                        status: e.http_status(),
                        message: e.to_string(),
                    });
                }
            }
        }

        let last = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());

        Err(ApplicationError::ExternalServiceError {
            status: None,
            message: format!("All API keys failed. Last error: {}", last),
        })
    }
}
