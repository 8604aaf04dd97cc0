//! OpenAI Speech Client - 转写与合成适配器
//!
//! 实现 SpeechToTextPort（Whisper 转写，multipart 上传）
//! 与 TextToSpeechPort（TTS 合成，返回音频字节）。

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::application::ports::{SpeechError, SpeechToTextPort, TextToSpeechPort};

use super::OpenAiConfig;

/// 合成服务接受的最大输入长度（字符）
const MAX_TTS_INPUT_CHARS: usize = 4096;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Serialize)]
struct SpeechRequest {
    model: String,
    voice: String,
    input: String,
}

/// OpenAI Speech 客户端
pub struct OpenAiSpeechClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiSpeechClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn transcriptions_url(&self) -> String {
        format!("{}/v1/audio/transcriptions", self.config.base_url)
    }

    fn speech_url(&self) -> String {
        format!("{}/v1/audio/speech", self.config.base_url)
    }
}

fn map_request_error(e: reqwest::Error) -> SpeechError {
    if e.is_timeout() {
        SpeechError::Timeout
    } else if e.is_connect() {
        SpeechError::NetworkError(format!("Cannot connect to speech service: {}", e))
    } else {
        SpeechError::NetworkError(e.to_string())
    }
}

/// 按字符数截断（UTF-8 安全）
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl SpeechToTextPort for OpenAiSpeechClient {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, SpeechError> {
        let data = tokio::fs::read(audio_path)
            .await
            .map_err(|e| SpeechError::IoError(e.to_string()))?;

        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.webm")
            .to_string();

        tracing::debug!(
            file = %file_name,
            bytes = data.len(),
            model = %self.config.transcribe_model,
            "Sending transcription request"
        );

        let form = Form::new()
            .text("model", self.config.transcribe_model.clone())
            .part(
                "file",
                Part::bytes(data)
                    .file_name(file_name)
                    .mime_str("application/octet-stream")
                    .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?,
            );

        let response = self
            .client
            .post(self.transcriptions_url())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?;

        tracing::debug!(transcript_len = body.text.len(), "Transcription received");
        Ok(body.text)
    }
}

#[async_trait]
impl TextToSpeechPort for OpenAiSpeechClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let request = SpeechRequest {
            model: self.config.tts_model.clone(),
            voice: self.config.tts_voice.clone(),
            input: truncate_chars(text, MAX_TTS_INPUT_CHARS).to_string(),
        };

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))?
            .to_vec();

        tracing::debug!(audio_bytes = audio.len(), "Speech synthesized");
        Ok(audio)
    }
}
