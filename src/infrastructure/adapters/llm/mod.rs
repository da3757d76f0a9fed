//! LLM Adapter - 生成模型 HTTP 客户端

mod http_gemini_client;

pub use http_gemini_client::{HttpGeminiClient, HttpGeminiClientConfig};
