//! Temp Audio Store - 文件系统临时音频存储
//!
//! 实现 AudioStoragePort trait。
//! 每个请求一个 UUID 命名的临时文件，请求结束后删除。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{AudioStorageError, AudioStoragePort};

/// 文件系统临时音频存储
pub struct FsAudioStore {
    /// 临时文件目录
    dir: PathBuf,
}

impl FsAudioStore {
    /// 在指定目录下创建临时音频存储
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// 使用系统临时目录
    pub fn system_temp() -> Self {
        Self::new(std::env::temp_dir().join("remedi-audio"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl AudioStoragePort for FsAudioStore {
    async fn save_temp(&self, data: &[u8]) -> Result<PathBuf, AudioStorageError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        let path = self.dir.join(format!("{}.webm", Uuid::new_v4()));
        fs::write(&path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(e.to_string()))?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Temp audio saved");
        Ok(path)
    }

    async fn cleanup(&self, path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Temp audio removed");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove temp audio");
            }
        }
    }
}
