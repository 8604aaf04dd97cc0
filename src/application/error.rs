//! 应用层错误定义
//!
//! 统一的问答/语音用例错误类型

use thiserror::Error;

use super::ports::{
    AudioStorageError, GenerationError, RetrievalError, SpeechError,
};

/// 应用层错误
#[derive(Debug, Error)]
pub enum AnswerError {
    /// 输入为空或仅含空白
    #[error("No input")]
    EmptyQuery,

    /// 转写结果为空（静音/噪声），在调用生成前拒绝
    #[error("Transcribe failed")]
    TranscriptionFailed,

    /// 检索失败
    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    /// 生成失败
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// 语音服务失败
    #[error("Speech service failed: {0}")]
    Speech(#[from] SpeechError),

    /// 临时文件存储失败
    #[error("Audio storage failed: {0}")]
    Storage(#[from] AudioStorageError),
}

impl AnswerError {
    /// 是否为客户端输入错误（HTTP 400）
    pub fn is_bad_input(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::TranscriptionFailed)
    }
}
