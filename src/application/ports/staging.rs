//! Staging Port - 请求级临时工作区
//!
//! 每个混音请求拥有一个独立目录，用于落盘待解码的片段

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// 工作区错误
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Workspace already exists: {0}")]
    WorkspaceExists(Uuid),

    #[error("Invalid artifact name: {0}")]
    InvalidName(String),
}

/// Staging Port - 出站端口
#[async_trait]
pub trait StagingPort: Send + Sync {
    /// 获取请求工作区目录
    fn workspace_dir(&self, request_id: Uuid) -> PathBuf;

    /// 创建工作区，同一 request_id 不允许重复创建
    async fn create_workspace(&self, request_id: Uuid) -> Result<PathBuf, StagingError>;

    /// 将数据写入工作区，返回文件路径
    async fn stage(
        &self,
        request_id: Uuid,
        name: &str,
        data: &[u8],
    ) -> Result<PathBuf, StagingError>;

    /// 删除工作区及其全部文件，返回删除的文件数
    ///
    /// 同步接口：需要在 Drop 中调用
    fn release(&self, request_id: Uuid) -> Result<u64, StagingError>;

    /// 工作区是否存在
    fn workspace_exists(&self, request_id: Uuid) -> bool {
        self.workspace_dir(request_id).exists()
    }
}
