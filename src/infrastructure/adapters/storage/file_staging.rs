//! File Staging - 文件系统请求工作区实现
//!
//! 实现 StagingPort trait。每个请求对应 `base_dir/<request_id>/` 目录。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{StagingError, StagingPort};

/// 文件系统工作区
pub struct FileStaging {
    /// 工作区根目录
    base_dir: PathBuf,
}

impl FileStaging {
    /// 创建新的工作区存储，根目录不存在时自动创建
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, StagingError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| StagingError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取工作区根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn validate_name(name: &str) -> Result<(), StagingError> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\');
        if invalid {
            return Err(StagingError::InvalidName(name.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StagingPort for FileStaging {
    fn workspace_dir(&self, request_id: Uuid) -> PathBuf {
        self.base_dir.join(request_id.to_string())
    }

    async fn create_workspace(&self, request_id: Uuid) -> Result<PathBuf, StagingError> {
        let dir = self.workspace_dir(request_id);

        match fs::create_dir(&dir).await {
            Ok(()) => Ok(dir),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(StagingError::WorkspaceExists(request_id))
            }
            Err(e) => Err(StagingError::IoError(e.to_string())),
        }
    }

    async fn stage(
        &self,
        request_id: Uuid,
        name: &str,
        data: &[u8],
    ) -> Result<PathBuf, StagingError> {
        Self::validate_name(name)?;

        let path = self.workspace_dir(request_id).join(name);

        fs::write(&path, data)
            .await
            .map_err(|e| StagingError::IoError(e.to_string()))?;

        tracing::debug!(
            request_id = %request_id,
            name,
            size = data.len(),
            "Staged artifact"
        );

        Ok(path)
    }

    fn release(&self, request_id: Uuid) -> Result<u64, StagingError> {
        let dir = self.workspace_dir(request_id);

        if !dir.exists() {
            return Ok(0);
        }

        let files = std::fs::read_dir(&dir)
            .map_err(|e| StagingError::IoError(e.to_string()))?
            .filter_map(Result::ok)
            .count() as u64;

        std::fs::remove_dir_all(&dir).map_err(|e| StagingError::IoError(e.to_string()))?;

        Ok(files)
    }
}
