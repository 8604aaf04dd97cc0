//! Noop Answer Cache - 空对象缓存实现
//!
//! 未配置或无法连接任何缓存后端时使用。
//! 查询永远未命中，写入永远失败，请求路径完全不受影响。

use async_trait::async_trait;

use crate::application::ports::{AnswerCachePort, CacheStats};

/// 空对象缓存
pub struct NoopAnswerCache;

#[async_trait]
impl AnswerCachePort for NoopAnswerCache {
    async fn lookup(&self, _query: &str) -> Option<String> {
        None
    }

    async fn store(&self, _query: &str, _answer: &str, _ttl_secs: u64) -> bool {
        false
    }

    async fn stats(&self) -> CacheStats {
        CacheStats::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_always_misses() {
        let cache = NoopAnswerCache;
        assert!(cache.lookup("any query").await.is_none());
    }

    #[tokio::test]
    async fn test_store_always_fails() {
        let cache = NoopAnswerCache;
        assert!(!cache.store("q", "a", 3600).await);
        // 写入后依然未命中
        assert!(cache.lookup("q").await.is_none());
    }

    #[tokio::test]
    async fn test_stats_reports_disabled() {
        let stats = NoopAnswerCache.stats().await;
        assert_eq!(stats.status, "disabled");
        assert!(stats.backend.is_none());
        assert!(stats.hits.is_none());
    }
}
