//! OpenAI Embedding Client - 嵌入适配器
//!
//! 实现 EmbeddingPort trait，调用 embeddings API。
//! 兼容 OpenAI 协议的自托管嵌入服务（通过 base_url 切换）。

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{EmbeddingError, EmbeddingPort};

use super::OpenAiConfig;

/// 单批最大文本数
const BATCH_SIZE: usize = 32;

#[derive(Debug, Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Debug, Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

/// OpenAI Embedding 客户端
pub struct OpenAiEmbeddingClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiEmbeddingClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.config.base_url)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request = EmbedRequest {
            model: self.config.embedding_model.clone(),
            input: texts.to_vec(),
        };

        let response = self
            .client
            .post(self.embeddings_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout
                } else if e.is_connect() {
                    EmbeddingError::NetworkError(format!(
                        "Cannot connect to embedding service: {}",
                        e
                    ))
                } else {
                    EmbeddingError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ServiceError(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        if body.data.len() != texts.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                body.data.len()
            )));
        }

        Ok(body.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingPort for OpenAiEmbeddingClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(BATCH_SIZE) {
            all.extend(self.embed_batch(chunk).await?);
        }

        tracing::debug!(texts = texts.len(), "Embeddings generated");
        Ok(all)
    }
}
