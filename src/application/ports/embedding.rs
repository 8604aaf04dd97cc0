//! Embedding Port - 文本向量化
//!
//! 定义对外部嵌入服务的抽象接口。
//! 仅在索引构建和检索（Retriever 内部）时使用。

use async_trait::async_trait;
use thiserror::Error;

/// 嵌入错误
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Embedding timeout")]
    Timeout,

    #[error("Embedding service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Embedding Port
#[async_trait]
pub trait EmbeddingPort: Send + Sync {
    /// 将一批文本转换为固定维度向量
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}
