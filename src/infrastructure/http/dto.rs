//! Data Transfer Objects
//!
//! HTTP 请求/响应结构

use serde::{Deserialize, Serialize};

use crate::application::CacheStats;

/// /get 请求参数（form 或 query string 的 msg 字段）
#[derive(Debug, Deserialize)]
pub struct AskParams {
    #[serde(default)]
    pub msg: Option<String>,
}

/// /get 响应
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub cached: bool,
}

/// /stats 响应
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub cache: CacheStats,
    pub model: String,
}

/// /transcribe 响应
#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

/// /text-to-speech 请求体
#[derive(Debug, Deserialize)]
pub struct TextToSpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// /text-to-speech 响应
#[derive(Debug, Serialize)]
pub struct SpeechResponse {
    pub audio_base64: String,
}

/// /voice-query 响应
#[derive(Debug, Serialize)]
pub struct VoiceQueryResponse {
    pub text: String,
    pub answer: String,
    pub audio_base64: String,
}
