//! Answer Cache Port - 问答缓存
//!
//! 定义问答缓存的抽象接口，具体实现使用 Redis。
//! 缓存是机会性的旁路优化：后端不可用时所有操作静默降级，
//! 绝不向请求路径传播错误。

use async_trait::async_trait;
use serde::Serialize;

/// 默认缓存过期时间（秒）
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// 缓存统计信息
///
/// status: "active" | "disabled" | "error"
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misses: Option<u64>,
}

impl CacheStats {
    pub fn disabled() -> Self {
        Self {
            status: "disabled",
            backend: None,
            hits: None,
            misses: None,
        }
    }

    pub fn active(backend: &'static str) -> Self {
        Self {
            status: "active",
            backend: Some(backend),
            hits: None,
            misses: None,
        }
    }

    pub fn error() -> Self {
        Self {
            status: "error",
            backend: None,
            hits: None,
            misses: None,
        }
    }
}

/// Answer Cache Port
///
/// 缓存 key: "rag:" + md5(原始查询字符串)
/// 查询字符串不做任何规范化，大小写和空白敏感
#[async_trait]
pub trait AnswerCachePort: Send + Sync {
    /// 查询缓存的答案
    ///
    /// 命中且未过期时返回答案；未命中、已过期或后端不可用时返回 None
    async fn lookup(&self, query: &str) -> Option<String>;

    /// 写入答案并设置过期时间
    ///
    /// 返回是否写入成功；失败静默降级，不影响请求
    async fn store(&self, query: &str, answer: &str, ttl_secs: u64) -> bool;

    /// 获取缓存统计信息
    async fn stats(&self) -> CacheStats;
}

/// 生成缓存 key
///
/// 使用 md5(原始查询) 作为缓存 key，带 "rag:" 前缀
pub fn cache_key(query: &str) -> String {
    let digest = md5::compute(query.as_bytes());
    format!("rag:{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_deterministic() {
        assert_eq!(cache_key("What is BP?"), cache_key("What is BP?"));
    }

    #[test]
    fn test_cache_key_case_sensitive() {
        // 原始字符串不规范化：大小写不同即不同 key
        assert_ne!(cache_key("what is bp?"), cache_key("What is BP?"));
    }

    #[test]
    fn test_cache_key_whitespace_sensitive() {
        assert_ne!(cache_key("What is BP?"), cache_key(" What is BP? "));
    }

    #[test]
    fn test_cache_key_format() {
        let key = cache_key("q");
        assert!(key.starts_with("rag:"));
        // md5 十六进制摘要为 32 字符
        assert_eq!(key.len(), "rag:".len() + 32);
    }
}
