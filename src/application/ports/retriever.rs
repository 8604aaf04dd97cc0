//! Retriever Port - 向量检索
//!
//! 定义对外部向量索引的相似度检索抽象接口

use async_trait::async_trait;
use thiserror::Error;

/// 检索错误
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Retrieval timeout")]
    Timeout,

    #[error("Index service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 检索到的上下文块
#[derive(Debug, Clone)]
pub struct ContextChunk {
    /// 文本内容
    pub text: String,
    /// 相似度得分
    pub score: f32,
    /// 来源文档（可选）
    pub source: Option<String>,
}

/// Retriever Port
///
/// 返回与查询最相关的至多 k 个文本块，按相关度降序排列，不去重
#[async_trait]
pub trait RetrieverPort: Send + Sync {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ContextChunk>, RetrievalError>;
}
