//! Voice HTTP Handlers
//!
//! /transcribe、/text-to-speech、/voice-query 三个语音端点。
//! 音频以 multipart 字段 file 上传，合成结果以 base64 返回。

use axum::extract::{Multipart, State};
use axum::Json;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

use crate::infrastructure::http::dto::{
    SpeechResponse, TextToSpeechRequest, TranscriptionResponse, VoiceQueryResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 读取 multipart 中的 file 字段
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<Vec<u8>>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
            return Ok(Some(bytes.to_vec()));
        }
    }

    Ok(None)
}

/// 音频转写（POST /transcribe）
pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let audio = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No file".to_string()))?;

    let text = state.voice.transcribe(&audio).await?;
    Ok(Json(TranscriptionResponse { text }))
}

/// 语音合成（POST /text-to-speech）
pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    request: Option<Json<TextToSpeechRequest>>,
) -> Result<Json<SpeechResponse>, ApiError> {
    // 请求体缺失、非 JSON 或缺少 text 字段统一按缺失处理
    let text = request
        .and_then(|Json(r)| r.text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No text".to_string()))?;

    let audio = state.voice.synthesize(&text).await?;

    Ok(Json(SpeechResponse {
        audio_base64: STANDARD.encode(audio),
    }))
}

/// 语音问答（POST /voice-query）
pub async fn voice_query(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<VoiceQueryResponse>, ApiError> {
    let audio = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No file".to_string()))?;

    let result = state.voice.voice_answer(&audio).await?;

    Ok(Json(VoiceQueryResponse {
        text: result.transcript,
        answer: result.answer,
        audio_base64: STANDARD.encode(result.audio),
    }))
}
