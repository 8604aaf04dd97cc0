//! Speech Ports - 语音转写与合成
//!
//! 定义对外部 STT / TTS 服务的抽象接口

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 语音服务错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Speech service timeout")]
    Timeout,

    #[error("Speech service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Speech-to-Text Port
#[async_trait]
pub trait SpeechToTextPort: Send + Sync {
    /// 转写音频文件为文本
    async fn transcribe(&self, audio_path: &Path) -> Result<String, SpeechError>;
}

/// Text-to-Speech Port
#[async_trait]
pub trait TextToSpeechPort: Send + Sync {
    /// 合成文本为音频字节
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}
