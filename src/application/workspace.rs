//! Request Workspace - 请求级工作区守卫
//!
//! 请求开始时获取，Drop 时释放。成功、校验失败、解码失败、混音失败
//! 以及 panic 展开都会经过 Drop，因此落盘文件总会被清理。

use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::{Handle, RuntimeFlavor};
use uuid::Uuid;

use crate::application::ports::{StagingError, StagingPort};

pub struct RequestWorkspace {
    staging: Arc<dyn StagingPort>,
    request_id: Uuid,
}

impl RequestWorkspace {
    /// 以新的 request_id 创建工作区
    pub async fn open(staging: Arc<dyn StagingPort>) -> Result<Self, StagingError> {
        let request_id = Uuid::new_v4();
        staging.create_workspace(request_id).await?;

        tracing::debug!(request_id = %request_id, "Workspace opened");

        Ok(Self {
            staging,
            request_id,
        })
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// 将数据写入本工作区
    pub async fn stage(&self, name: &str, data: &[u8]) -> Result<PathBuf, StagingError> {
        self.staging.stage(self.request_id, name, data).await
    }
}

/// 在多线程运行时的 worker 上释放时，先交出 worker 再做阻塞删除；
/// current_thread 运行时不支持 block_in_place，直接删除。
fn release_blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

impl Drop for RequestWorkspace {
    fn drop(&mut self) {
        let staging = &self.staging;
        let request_id = self.request_id;
        match release_blocking(|| staging.release(request_id)) {
            Ok(files) => {
                tracing::debug!(request_id = %self.request_id, files, "Workspace released");
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %self.request_id,
                    error = %e,
                    "Failed to release workspace"
                );
            }
        }
    }
}
