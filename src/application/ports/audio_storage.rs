//! Audio Storage Port - 临时音频文件
//!
//! 定义上传音频的临时落盘接口。
//! 每个请求独占一个唯一命名的临时文件，处理结束后必须删除。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// Audio Storage Port
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 保存上传音频到唯一命名的临时文件，返回文件路径
    async fn save_temp(&self, data: &[u8]) -> Result<PathBuf, AudioStorageError>;

    /// 删除临时文件（幂等，失败仅记录日志）
    async fn cleanup(&self, path: &Path);
}
