//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `REMEDI_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// 凭证另外接受裸环境变量 `OPENAI_API_KEY` / `PINECONE_API_KEY`，
/// 缓存 URL 接受 `REDIS_URL`。
///
/// # 环境变量示例
/// - `REMEDI_SERVER__PORT=8080`
/// - `REMEDI_OPENAI__API_KEY=sk-...`
/// - `REMEDI_PINECONE__INDEX_HOST=medical-chatbot-xxx.svc.pinecone.io`
/// - `REMEDI_CACHE__URL=redis://cache:6379`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 2. 添加环境变量（最高优先级）
    // 前缀: REMEDI_
    // 层级分隔符: __ (双下划线)
    // 例如: REMEDI_OPENAI__API_KEY=sk-...
    builder = builder.add_source(
        Environment::with_prefix("REMEDI")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 3. 构建配置（默认值由 serde default 提供）
    let config = builder.build()?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 4. 凭证的裸环境变量回退
    apply_env_fallbacks(&mut app_config);

    // 5. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 裸环境变量回退（与原有部署环境兼容）
fn apply_env_fallbacks(config: &mut AppConfig) {
    if config.openai.api_key.is_empty() {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.openai.api_key = key;
        }
    }
    if config.pinecone.api_key.is_empty() {
        if let Ok(key) = std::env::var("PINECONE_API_KEY") {
            config.pinecone.api_key = key;
        }
    }
    if config.cache.url.is_none() {
        if let Ok(url) = std::env::var("REDIS_URL") {
            config.cache.url = Some(url);
        }
    }
}

/// 验证配置有效性
///
/// 凭证缺失是致命错误；缓存配置缺失不是
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.openai.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "OpenAI API key is required (set REMEDI_OPENAI__API_KEY or OPENAI_API_KEY)"
                .to_string(),
        ));
    }

    if config.pinecone.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "Pinecone API key is required (set REMEDI_PINECONE__API_KEY or PINECONE_API_KEY)"
                .to_string(),
        ));
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.pinecone.top_k == 0 {
        return Err(ConfigError::ValidationError(
            "Pinecone top_k cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志，不输出凭证）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Debug: {}", config.server.debug);
    tracing::info!("Chat Model: {}", config.openai.chat_model);
    tracing::info!("Embedding Model: {}", config.openai.embedding_model);
    tracing::info!("Pinecone Index: {}", config.pinecone.index_name);
    tracing::info!("Pinecone Host: {}", config.pinecone.index_host);
    tracing::info!("Top K: {}", config.pinecone.top_k);
    tracing::info!(
        "Cache: {}",
        config.cache.url.as_deref().unwrap_or("(not configured)")
    );
    tracing::info!("Cache TTL: {}s", config.cache.ttl_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys() -> AppConfig {
        let mut config = AppConfig::default();
        config.openai.api_key = "sk-test".to_string();
        config.pinecone.api_key = "pc-test".to_string();
        config
    }

    #[test]
    fn test_default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.openai.chat_model, "gpt-4o-mini");
        assert_eq!(config.pinecone.index_name, "medical-chatbot");
        assert_eq!(config.pinecone.top_k, 3);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert!(config.cache.url.is_none());
    }

    #[test]
    fn test_validation_requires_openai_key() {
        let mut config = config_with_keys();
        config.openai.api_key = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_requires_pinecone_key() {
        let mut config = config_with_keys();
        config.pinecone.api_key = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_passes_with_keys() {
        assert!(validate_config(&config_with_keys()).is_ok());
    }

    #[test]
    fn test_validation_allows_missing_cache() {
        let mut config = config_with_keys();
        config.cache.url = None;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = config_with_keys();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }
}
