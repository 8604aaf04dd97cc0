//! HTTP Routes
//!
//! API 路由定义
//!
//! Endpoints:
//! - /                GET       首页
//! - /get             GET/POST  文本问答（msg 字段）
//! - /stats           GET       缓存与模型状态
//! - /transcribe      POST      音频转写（multipart file）
//! - /text-to-speech  POST      语音合成（JSON {text}）
//! - /voice-query     POST      语音问答（multipart file）
//! - /ping            GET       健康检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/get", get(handlers::ask_get).post(handlers::ask_post))
        .route("/stats", get(handlers::stats))
        .route("/transcribe", post(handlers::transcribe))
        .route("/text-to-speech", post(handlers::text_to_speech))
        .route("/voice-query", post(handlers::voice_query))
        .route("/ping", get(handlers::ping))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        AnswerCachePort, SpeechError, SpeechToTextPort, TextToSpeechPort,
    };
    use crate::application::rag::tests::{CountingGenerator, FixedRetriever, MemoryCache};
    use crate::application::{RagService, VoiceService};
    use crate::infrastructure::storage::FsAudioStore;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::Value;
    use std::path::Path;
    use tower::util::ServiceExt;

    struct FakeTranscriber {
        text: String,
    }

    #[async_trait]
    impl SpeechToTextPort for FakeTranscriber {
        async fn transcribe(&self, _audio_path: &Path) -> Result<String, SpeechError> {
            Ok(self.text.clone())
        }
    }

    struct FakeSynthesizer;

    #[async_trait]
    impl TextToSpeechPort for FakeSynthesizer {
        async fn synthesize(&self, _text: &str) -> Result<Vec<u8>, SpeechError> {
            Ok(b"fake-audio".to_vec())
        }
    }

    fn build_app(
        transcript: &str,
        answer: &str,
    ) -> (Router, Arc<CountingGenerator>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let generator = CountingGenerator::returning(answer);
        let rag = Arc::new(RagService::new(
            Arc::new(MemoryCache::new()) as Arc<dyn AnswerCachePort>,
            Arc::new(FixedRetriever),
            generator.clone(),
        ));
        let voice = Arc::new(VoiceService::new(
            rag.clone(),
            Arc::new(FsAudioStore::new(dir.path())),
            Arc::new(FakeTranscriber {
                text: transcript.to_string(),
            }),
            Arc::new(FakeSynthesizer),
        ));
        let state = Arc::new(AppState::new(rag, voice));
        (create_routes().with_state(state), generator, dir)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_file_request(uri: &str, data: &[u8]) -> Request<Body> {
        let boundary = "x-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"q.webm\"\r\nContent-Type: audio/webm\r\n\r\n",
                boundary
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_without_msg_returns_400() {
        let (app, generator, _dir) = build_app("", "unused");
        let request = Request::builder()
            .uri("/get")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "No input");
        // 未触发生成
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_whitespace_msg_returns_400() {
        let (app, generator, _dir) = build_app("", "unused");
        let request = Request::builder()
            .uri("/get?msg=%20%20")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_get_answers_then_serves_from_cache() {
        let (app, generator, _dir) =
            build_app("", "Hypertension is high blood pressure.");

        let first = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/get?msg=What%20is%20hypertension%3F")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let json = body_json(first).await;
        assert_eq!(json["answer"], "Hypertension is high blood pressure.");
        assert_eq!(json["cached"], false);

        let second = app
            .oneshot(
                Request::builder()
                    .uri("/get?msg=What%20is%20hypertension%3F")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(second).await;
        assert_eq!(json["cached"], true);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_get_accepts_post_form() {
        let (app, _generator, _dir) = build_app("", "Answer.");
        let request = Request::builder()
            .method("POST")
            .uri("/get")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("msg=What+is+BP%3F"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["answer"], "Answer.");
    }

    #[tokio::test]
    async fn test_stats_reports_cache_and_model() {
        let (app, _generator, _dir) = build_app("", "unused");
        let request = Request::builder()
            .uri("/stats")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["cache"]["status"], "active");
    }

    #[tokio::test]
    async fn test_text_to_speech_without_text_returns_400() {
        let (app, _generator, _dir) = build_app("", "unused");
        let request = Request::builder()
            .method("POST")
            .uri("/text-to-speech")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "No text");
    }

    #[tokio::test]
    async fn test_text_to_speech_malformed_json_returns_400() {
        let (app, _generator, _dir) = build_app("", "unused");
        let request = Request::builder()
            .method("POST")
            .uri("/text-to-speech")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "No text");
    }

    #[tokio::test]
    async fn test_text_to_speech_returns_base64_audio() {
        let (app, _generator, _dir) = build_app("", "unused");
        let request = Request::builder()
            .method("POST")
            .uri("/text-to-speech")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text":"Drink water."}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let decoded = STANDARD
            .decode(json["audio_base64"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, b"fake-audio");
    }

    #[tokio::test]
    async fn test_transcribe_without_file_returns_400() {
        let (app, _generator, _dir) = build_app("hello", "unused");
        let boundary = "x-test-boundary";
        let request = Request::builder()
            .method("POST")
            .uri("/transcribe")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(format!("--{}--\r\n", boundary)))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "No file");
    }

    #[tokio::test]
    async fn test_transcribe_returns_text() {
        let (app, _generator, _dir) = build_app("What is BP?", "unused");
        let request = multipart_file_request("/transcribe", b"audio-bytes");

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["text"], "What is BP?");
    }

    #[tokio::test]
    async fn test_voice_query_happy_path() {
        let (app, generator, dir) = build_app("What is BP?", "BP is blood pressure.");
        let request = multipart_file_request("/voice-query", b"audio-bytes");

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["text"], "What is BP?");
        assert_eq!(json["answer"], "BP is blood pressure.");
        assert!(!json["audio_base64"].as_str().unwrap().is_empty());
        assert_eq!(generator.call_count(), 1);
        // 临时文件已清理
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_voice_query_empty_transcript_returns_400() {
        let (app, generator, _dir) = build_app("   ", "unused");
        let request = multipart_file_request("/voice-query", b"silence");

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Transcribe failed");
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_voice_query_without_file_returns_400() {
        let (app, _generator, _dir) = build_app("hello", "unused");
        let boundary = "x-test-boundary";
        let request = Request::builder()
            .method("POST")
            .uri("/voice-query")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(format!("--{}--\r\n", boundary)))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "No file");
    }

    #[tokio::test]
    async fn test_index_serves_landing_page() {
        let (app, _generator, _dir) = build_app("", "unused");
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<html"));
    }

    #[tokio::test]
    async fn test_ping() {
        let (app, _generator, _dir) = build_app("", "unused");
        let request = Request::builder().uri("/ping").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }
}
