//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::{DecodeError, StagingError};
use crate::domain::mix::MixError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求参数错误，未做任何处理
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 某个语音片段解码失败，整个请求中止
    #[error("Segment {index} could not be decoded: {source}")]
    DecodeError {
        index: usize,
        #[source]
        source: DecodeError,
    },

    /// 拼接/混音/编码失败
    #[error("Mix error: {0}")]
    MixError(String),

    /// 临时工作区错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 配置缺失
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 外部服务错误
    #[error("External service error: {message}")]
    ExternalServiceError {
        status: Option<u16>,
        message: String,
    },
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建片段解码错误
    pub fn decode(index: usize, source: DecodeError) -> Self {
        Self::DecodeError { index, source }
    }
}

impl From<StagingError> for ApplicationError {
    fn from(err: StagingError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<MixError> for ApplicationError {
    fn from(err: MixError) -> Self {
        Self::MixError(err.to_string())
    }
}
