//! Voice Bridge - 语音问答编排
//!
//! 上传音频 → 临时落盘 → 转写 → 复用 RAG 编排 → 合成语音。
//! 临时文件在所有退出路径（成功或失败）上都会被删除。

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::Query;

use super::error::AnswerError;
use super::ports::{AudioStoragePort, SpeechToTextPort, TextToSpeechPort};
use super::rag::RagService;

/// 语音问答结果
#[derive(Debug, Clone)]
pub struct VoiceAnswer {
    /// 转写文本
    pub transcript: String,
    /// 回答文本
    pub answer: String,
    /// 合成的回答音频
    pub audio: Vec<u8>,
}

/// 语音桥接服务
pub struct VoiceService {
    rag: Arc<RagService>,
    audio_store: Arc<dyn AudioStoragePort>,
    transcriber: Arc<dyn SpeechToTextPort>,
    synthesizer: Arc<dyn TextToSpeechPort>,
}

impl VoiceService {
    pub fn new(
        rag: Arc<RagService>,
        audio_store: Arc<dyn AudioStoragePort>,
        transcriber: Arc<dyn SpeechToTextPort>,
        synthesizer: Arc<dyn TextToSpeechPort>,
    ) -> Self {
        Self {
            rag,
            audio_store,
            transcriber,
            synthesizer,
        }
    }

    /// 语音问答
    ///
    /// 转写为空时在调用生成前拒绝，避免对静音/噪声浪费一次 LLM 调用。
    /// 语音问答与文本问答共用同一缓存。
    pub async fn voice_answer(&self, audio: &[u8]) -> Result<VoiceAnswer, AnswerError> {
        let start = Instant::now();
        let path = self.audio_store.save_temp(audio).await?;
        let result = self.voice_answer_at(&path).await;
        self.audio_store.cleanup(&path).await;

        match &result {
            Ok(answer) => {
                tracing::info!(
                    latency_ms = start.elapsed().as_millis() as u64,
                    transcript_len = answer.transcript.len(),
                    audio_bytes = answer.audio.len(),
                    "Voice query completed"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Voice query failed");
            }
        }

        result
    }

    async fn voice_answer_at(&self, path: &Path) -> Result<VoiceAnswer, AnswerError> {
        let transcript = self.transcriber.transcribe(path).await?;
        if transcript.trim().is_empty() {
            return Err(AnswerError::TranscriptionFailed);
        }

        let query =
            Query::new(transcript.as_str()).map_err(|_| AnswerError::TranscriptionFailed)?;
        let answer = self.rag.answer(&query).await?;
        let audio = self.synthesizer.synthesize(&answer.answer).await?;

        Ok(VoiceAnswer {
            transcript,
            answer: answer.answer,
            audio,
        })
    }

    /// 仅转写（/transcribe 端点）
    ///
    /// 返回原始转写文本，不做空白校验
    pub async fn transcribe(&self, audio: &[u8]) -> Result<String, AnswerError> {
        let path = self.audio_store.save_temp(audio).await?;
        let result = self.transcriber.transcribe(&path).await;
        self.audio_store.cleanup(&path).await;
        Ok(result?)
    }

    /// 仅合成（/text-to-speech 端点）
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AnswerError> {
        Ok(self.synthesizer.synthesize(text).await?)
    }
}
