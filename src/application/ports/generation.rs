//! Generation Port - 语言模型生成
//!
//! 定义对外部补全服务的抽象接口。
//! 单次调用、快速失败：上游服务自带重试与退避，这一层不做重试。

use async_trait::async_trait;
use thiserror::Error;

/// 生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Generation timeout")]
    Timeout,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Model service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Generation Port
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// 对组装好的 prompt 生成回答文本
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// 使用的模型名（用于 /stats）
    fn model(&self) -> &str;
}
