//! Answer Cache - 问答缓存适配器
//!
//! 启动时按优先级探测候选后端（配置的 URL > 本地默认），
//! 全部失败时退回空对象实现。缓存不可用不会阻止启动。

mod noop_cache;
mod redis_cache;

pub use noop_cache::NoopAnswerCache;
pub use redis_cache::{RedisAnswerCache, RedisCacheConfig};

use std::sync::Arc;

use crate::application::ports::AnswerCachePort;

/// 本地默认后端
const LOCAL_URL: &str = "redis://127.0.0.1:6379";

/// 缓存后端选择选项
#[derive(Debug, Clone, Default)]
pub struct CacheOptions {
    /// 配置的后端 URL（可选）
    pub url: Option<String>,
    /// 探测超时（秒）
    pub probe_timeout_secs: u64,
    /// 单次操作超时（秒）
    pub op_timeout_secs: u64,
}

/// 选择缓存后端
///
/// 候选按优先级依次探测，返回第一个可用的具体实现；
/// 全部不可用时返回空对象。该函数不会失败。
pub async fn select_backend(options: &CacheOptions) -> Arc<dyn AnswerCachePort> {
    let mut candidates: Vec<(String, &'static str)> = Vec::new();
    if let Some(url) = &options.url {
        candidates.push((url.clone(), "redis"));
    }
    candidates.push((LOCAL_URL.to_string(), "local"));

    for (url, backend) in candidates {
        let config = RedisCacheConfig {
            url,
            probe_timeout_secs: options.probe_timeout_secs.max(1),
            op_timeout_secs: options.op_timeout_secs.max(1),
        };
        match RedisAnswerCache::connect(&config, backend).await {
            Ok(cache) => {
                return Arc::new(cache);
            }
            Err(e) => {
                tracing::warn!(backend, url = %config.url, error = %e, "Cache backend unavailable");
            }
        }
    }

    tracing::info!("No cache backend reachable, answer caching disabled");
    Arc::new(NoopAnswerCache)
}
