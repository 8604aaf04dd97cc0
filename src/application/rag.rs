//! RAG Orchestrator - 问答编排
//!
//! 核心控制流：缓存查询 → 未命中时检索 → 组装 prompt → 生成 → 回写缓存。
//! 缓存不可用只损失去重收益，绝不导致请求失败。

use std::sync::Arc;
use std::time::Instant;

use crate::domain::Query;

use super::error::AnswerError;
use super::ports::{
    AnswerCachePort, CacheStats, GenerationPort, RetrieverPort, DEFAULT_TTL_SECS,
};
use super::prompt::assemble_prompt;

/// 默认检索块数量
pub const DEFAULT_TOP_K: usize = 3;

/// 问答结果
#[derive(Debug, Clone)]
pub struct RagAnswer {
    pub answer: String,
    /// 是否来自缓存（原样复用）
    pub cached: bool,
}

/// RAG 编排服务
pub struct RagService {
    cache: Arc<dyn AnswerCachePort>,
    retriever: Arc<dyn RetrieverPort>,
    generator: Arc<dyn GenerationPort>,
    top_k: usize,
    cache_ttl_secs: u64,
}

impl RagService {
    pub fn new(
        cache: Arc<dyn AnswerCachePort>,
        retriever: Arc<dyn RetrieverPort>,
        generator: Arc<dyn GenerationPort>,
    ) -> Self {
        Self {
            cache,
            retriever,
            generator,
            top_k: DEFAULT_TOP_K,
            cache_ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_cache_ttl(mut self, ttl_secs: u64) -> Self {
        self.cache_ttl_secs = ttl_secs;
        self
    }

    /// 回答用户问题
    ///
    /// 1. 以原始查询字符串查缓存，命中则直接返回
    /// 2. 未命中：检索 top-k 上下文 → 组装 prompt → 调用生成服务
    /// 3. 回写缓存（fire-and-forget，失败不影响请求）
    pub async fn answer(&self, query: &Query) -> Result<RagAnswer, AnswerError> {
        let start = Instant::now();

        if let Some(answer) = self.cache.lookup(query.as_str()).await {
            tracing::info!(
                latency_ms = start.elapsed().as_millis() as u64,
                cached = true,
                "Answer served from cache"
            );
            return Ok(RagAnswer {
                answer,
                cached: true,
            });
        }

        let chunks = self.retriever.retrieve(query.as_str(), self.top_k).await?;
        let prompt = assemble_prompt(&chunks, query.as_str());
        let answer = self.generator.generate(&prompt).await?;

        if !self
            .cache
            .store(query.as_str(), &answer, self.cache_ttl_secs)
            .await
        {
            tracing::debug!("Answer cache store skipped");
        }

        tracing::info!(
            latency_ms = start.elapsed().as_millis() as u64,
            cached = false,
            context_chunks = chunks.len(),
            "Answer generated"
        );

        Ok(RagAnswer {
            answer,
            cached: false,
        })
    }

    /// 缓存统计（用于 /stats）
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// 生成模型名（用于 /stats）
    pub fn model(&self) -> &str {
        self.generator.model()
    }
}
