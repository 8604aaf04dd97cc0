//! Redis Answer Cache - Redis 问答缓存实现
//!
//! 实现 AnswerCachePort trait。
//! 所有操作 fail open：后端故障时查询降级为未命中，写入降级为 false，
//! 统计降级为 error 状态，绝不向请求路径抛错。

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;

use crate::application::ports::{cache_key, AnswerCachePort, CacheStats};

/// Redis 缓存配置
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// 连接 URL
    pub url: String,
    /// 建连 + PING 探测超时（秒）
    pub probe_timeout_secs: u64,
    /// 单次操作超时（秒）
    pub op_timeout_secs: u64,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            probe_timeout_secs: 2,
            op_timeout_secs: 2,
        }
    }
}

/// Redis 问答缓存
pub struct RedisAnswerCache {
    conn: ConnectionManager,
    backend: &'static str,
    op_timeout: Duration,
}

impl RedisAnswerCache {
    /// 建立连接并探测可用性
    ///
    /// 在 probe_timeout 内完成建连和 PING，否则视为不可用
    pub async fn connect(
        config: &RedisCacheConfig,
        backend: &'static str,
    ) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(config.url.as_str())?;
        let probe = Duration::from_secs(config.probe_timeout_secs);

        let mut conn = tokio::time::timeout(probe, ConnectionManager::new(client))
            .await
            .map_err(|_| timeout_error("connect timed out"))??;

        let pong: String = tokio::time::timeout(
            probe,
            redis::cmd("PING").query_async(&mut conn),
        )
        .await
        .map_err(|_| timeout_error("ping timed out"))??;

        if pong != "PONG" {
            return Err(timeout_error("unexpected ping reply"));
        }

        tracing::info!(backend, url = %config.url, "Redis answer cache connected");

        Ok(Self {
            conn,
            backend,
            op_timeout: Duration::from_secs(config.op_timeout_secs),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.conn.clone();
        tokio::time::timeout(
            self.op_timeout,
            redis::cmd("GET").arg(key).query_async(&mut conn),
        )
        .await
        .map_err(|_| timeout_error("get timed out"))?
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.conn.clone();
        tokio::time::timeout(
            self.op_timeout,
            redis::cmd("SET").arg(key).arg(value).query_async(&mut conn),
        )
        .await
        .map_err(|_| timeout_error("set timed out"))?
    }

    async fn expire(&self, key: &str, ttl_secs: u64) -> Result<(), redis::RedisError> {
        let mut conn = self.conn.clone();
        let _applied: i64 = tokio::time::timeout(
            self.op_timeout,
            redis::cmd("EXPIRE")
                .arg(key)
                .arg(ttl_secs)
                .query_async(&mut conn),
        )
        .await
        .map_err(|_| timeout_error("expire timed out"))??;
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), redis::RedisError> {
        let mut conn = self.conn.clone();
        tokio::time::timeout(
            self.op_timeout,
            redis::cmd("SETEX")
                .arg(key)
                .arg(ttl_secs)
                .arg(value)
                .query_async(&mut conn),
        )
        .await
        .map_err(|_| timeout_error("setex timed out"))?
    }

    async fn info_stats(&self) -> Result<String, redis::RedisError> {
        let mut conn = self.conn.clone();
        tokio::time::timeout(
            self.op_timeout,
            redis::cmd("INFO").arg("stats").query_async(&mut conn),
        )
        .await
        .map_err(|_| timeout_error("info timed out"))?
    }
}

#[async_trait]
impl AnswerCachePort for RedisAnswerCache {
    async fn lookup(&self, query: &str) -> Option<String> {
        let key = cache_key(query);
        match self.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<String>(&raw) {
                Ok(answer) => Some(answer),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Corrupt cache entry ignored");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    async fn store(&self, query: &str, answer: &str, ttl_secs: u64) -> bool {
        let key = cache_key(query);
        let value = match serde_json::to_string(answer) {
            Ok(v) => v,
            Err(_) => return false,
        };

        if let Err(e) = self.set(&key, &value).await {
            tracing::debug!(error = %e, "Cache store failed");
            return false;
        }

        // TTL 单独设置失败时，退回到合并的 SETEX，
        // 保证条目不会以无过期时间的状态留在缓存中
        if let Err(e) = self.expire(&key, ttl_secs).await {
            tracing::debug!(error = %e, "EXPIRE failed, falling back to SETEX");
            if let Err(e) = self.set_ex(&key, &value, ttl_secs).await {
                tracing::debug!(error = %e, "SETEX fallback failed");
                return false;
            }
        }

        true
    }

    async fn stats(&self) -> CacheStats {
        match self.info_stats().await {
            Ok(info) => {
                let mut stats = CacheStats::active(self.backend);
                stats.hits = parse_info_field(&info, "keyspace_hits");
                stats.misses = parse_info_field(&info, "keyspace_misses");
                stats
            }
            Err(e) => {
                tracing::debug!(error = %e, "Cache stats inspection failed");
                CacheStats::error()
            }
        }
    }
}

/// 从 INFO 输出中解析整数字段
fn parse_info_field(info: &str, field: &str) -> Option<u64> {
    info.lines()
        .find_map(|line| line.strip_prefix(field)?.strip_prefix(':'))
        .and_then(|v| v.trim().parse().ok())
}

fn timeout_error(msg: &'static str) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::IoError, msg))
}
