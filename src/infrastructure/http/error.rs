//! HTTP Error Handling
//!
//! 统一错误响应：客户端输入错误 400，上游/内部失败 500。
//! 缓存错误不会到达这里（缓存层 fail open）。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::AnswerError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<AnswerError> for ApiError {
    fn from(e: AnswerError) -> Self {
        if e.is_bad_input() {
            ApiError::BadRequest(e.to_string())
        } else {
            ApiError::Internal(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::GenerationError;

    #[test]
    fn test_empty_query_maps_to_bad_request() {
        let api: ApiError = AnswerError::EmptyQuery.into();
        assert!(matches!(api, ApiError::BadRequest(msg) if msg == "No input"));
    }

    #[test]
    fn test_transcription_failure_maps_to_bad_request() {
        let api: ApiError = AnswerError::TranscriptionFailed.into();
        assert!(matches!(api, ApiError::BadRequest(msg) if msg == "Transcribe failed"));
    }

    #[test]
    fn test_generation_failure_maps_to_internal() {
        let err = AnswerError::Generation(GenerationError::Timeout);
        let api: ApiError = err.into();
        assert!(matches!(api, ApiError::Internal(_)));
    }
}
