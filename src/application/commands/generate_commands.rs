//! Generate Commands - 剧本生成代理命令

use serde_json::Value;

/// 调用生成模型
#[derive(Debug, Clone)]
pub struct GenerateContent {
    /// 模型名称，如 `gemini-2.5-flash`
    pub model: String,
    /// `{ contents, generationConfig }`
    pub request_body: Value,
}

/// 上游响应（原样返回给调用方）
#[derive(Debug, Clone)]
pub struct GenerateContentResponse {
    pub body: Value,
}
