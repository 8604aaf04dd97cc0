//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenAI 配置（生成/嵌入/语音）
    #[serde(default)]
    pub openai: OpenAiSettings,

    /// Pinecone 向量索引配置
    #[serde(default)]
    pub pinecone: PineconeSettings,

    /// 答案缓存配置
    #[serde(default)]
    pub cache: CacheSettings,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 调试模式（默认日志级别提升为 debug）
    #[serde(default)]
    pub debug: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// OpenAI 配置
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    /// API Key（必填，缺失时启动失败）
    #[serde(default)]
    pub api_key: String,

    /// API 基础 URL
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// 生成模型
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// 采样温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 生成最大 token 数
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// 嵌入模型
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// 转写模型
    #[serde(default = "default_transcribe_model")]
    pub transcribe_model: String,

    /// 合成模型
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// 合成音色
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_openai_timeout")]
    pub timeout_secs: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    500
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_transcribe_model() -> String {
    "whisper-1".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_tts_voice() -> String {
    "alloy".to_string()
}

fn default_openai_timeout() -> u64 {
    60
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openai_base_url(),
            chat_model: default_chat_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            embedding_model: default_embedding_model(),
            transcribe_model: default_transcribe_model(),
            tts_model: default_tts_model(),
            tts_voice: default_tts_voice(),
            timeout_secs: default_openai_timeout(),
        }
    }
}

/// Pinecone 配置
#[derive(Debug, Clone, Deserialize)]
pub struct PineconeSettings {
    /// API Key（必填，缺失时启动失败）
    #[serde(default)]
    pub api_key: String,

    /// 索引数据面地址（服务启动必填；索引构建时自动发现）
    #[serde(default)]
    pub index_host: String,

    /// 索引名
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// 检索块数量
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// 嵌入维度（索引构建时使用）
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// 请求超时时间（秒）
    #[serde(default = "default_pinecone_timeout")]
    pub timeout_secs: u64,
}

fn default_index_name() -> String {
    "medical-chatbot".to_string()
}

fn default_top_k() -> usize {
    3
}

fn default_dimension() -> usize {
    384
}

fn default_pinecone_timeout() -> u64 {
    30
}

impl Default for PineconeSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            index_host: String::new(),
            index_name: default_index_name(),
            top_k: default_top_k(),
            dimension: default_dimension(),
            timeout_secs: default_pinecone_timeout(),
        }
    }
}

/// 答案缓存配置
///
/// 缓存可选：未配置或后端不可用时禁用缓存，不影响启动
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// 后端 URL（可选）
    #[serde(default)]
    pub url: Option<String>,

    /// 缓存过期时间（秒）
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    /// 探测超时（秒）
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// 单次操作超时（秒）
    #[serde(default = "default_op_timeout")]
    pub op_timeout_secs: u64,
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_probe_timeout() -> u64 {
    2
}

fn default_op_timeout() -> u64 {
    2
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            url: None,
            ttl_secs: default_cache_ttl(),
            probe_timeout_secs: default_probe_timeout(),
            op_timeout_secs: default_op_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
