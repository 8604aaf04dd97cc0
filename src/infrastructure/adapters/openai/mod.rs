//! OpenAI Adapters - 调用 OpenAI HTTP API
//!
//! 生成（chat completions）、嵌入（embeddings）、
//! 转写（Whisper）、语音合成（TTS）四个适配器共用一份配置。

mod chat;
mod embeddings;
mod speech;

pub use chat::OpenAiChatClient;
pub use embeddings::OpenAiEmbeddingClient;
pub use speech::OpenAiSpeechClient;

/// OpenAI 适配器配置
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API Key
    pub api_key: String,
    /// API 基础 URL
    pub base_url: String,
    /// 生成模型
    pub chat_model: String,
    /// 采样温度（低温度偏向确定性输出）
    pub temperature: f32,
    /// 生成最大 token 数
    pub max_tokens: u32,
    /// 嵌入模型
    pub embedding_model: String,
    /// 转写模型
    pub transcribe_model: String,
    /// 合成模型
    pub tts_model: String,
    /// 合成音色
    pub tts_voice: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 500,
            embedding_model: "text-embedding-3-small".to_string(),
            transcribe_model: "whisper-1".to_string(),
            tts_model: "tts-1".to_string(),
            tts_voice: "alloy".to_string(),
            timeout_secs: 60,
        }
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
