//! Pinecone Adapter - 外部向量索引
//!
//! 数据面：相似度查询（检索）与向量写入（索引构建）。
//! 控制面：索引存在性检查与创建（仅索引构建时使用）。
//!
//! Pinecone HTTP API:
//! POST https://{index_host}/query           {"vector": [...], "topK": 3, "includeMetadata": true}
//! POST https://{index_host}/vectors/upsert  {"vectors": [{"id", "values", "metadata"}]}
//! GET/POST https://api.pinecone.io/indexes  索引管理

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::application::ports::{ContextChunk, EmbeddingPort, RetrievalError, RetrieverPort};

/// 控制面基础 URL
const CONTROL_PLANE_URL: &str = "https://api.pinecone.io";

/// 单批最大写入向量数
const UPSERT_BATCH_SIZE: usize = 100;

/// Pinecone 错误
#[derive(Debug, Error)]
pub enum PineconeError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Pinecone timeout")]
    Timeout,

    #[error("Pinecone service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<PineconeError> for RetrievalError {
    fn from(e: PineconeError) -> Self {
        match e {
            PineconeError::NetworkError(msg) => RetrievalError::NetworkError(msg),
            PineconeError::Timeout => RetrievalError::Timeout,
            PineconeError::ServiceError(msg) => RetrievalError::ServiceError(msg),
            PineconeError::InvalidResponse(msg) => RetrievalError::InvalidResponse(msg),
        }
    }
}

fn map_request_error(e: reqwest::Error) -> PineconeError {
    if e.is_timeout() {
        PineconeError::Timeout
    } else if e.is_connect() {
        PineconeError::NetworkError(format!("Cannot connect to Pinecone: {}", e))
    } else {
        PineconeError::NetworkError(e.to_string())
    }
}

/// Pinecone 索引配置
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    /// API Key
    pub api_key: String,
    /// 索引数据面地址
    pub index_host: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

// ============================================================================
// 数据面
// ============================================================================

/// 向量块元数据（文本与来源随向量一起存储）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// 待写入的向量记录
#[derive(Debug, Serialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Serialize)]
struct QueryRequest {
    vector: Vec<f32>,
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    score: f32,
    metadata: Option<ChunkMetadata>,
}

#[derive(Debug, Serialize)]
struct UpsertRequest {
    vectors: Vec<VectorRecord>,
}

/// Pinecone 索引数据面客户端
pub struct PineconeIndex {
    client: Client,
    config: PineconeConfig,
}

impl PineconeIndex {
    pub fn new(config: PineconeConfig) -> Result<Self, PineconeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PineconeError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn index_url(&self, path: &str) -> String {
        let host = self.config.index_host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}{}", host, path)
        } else {
            format!("https://{}{}", host, path)
        }
    }

    /// 相似度查询，返回按得分降序的匹配
    pub async fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<(f32, ChunkMetadata)>, PineconeError> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let response = self
            .client
            .post(self.index_url("/query"))
            .header("Api-Key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PineconeError::ServiceError(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| PineconeError::InvalidResponse(e.to_string()))?;

        Ok(body
            .matches
            .into_iter()
            .filter_map(|m| m.metadata.map(|meta| (m.score, meta)))
            .collect())
    }

    /// 批量写入向量
    pub async fn upsert(&self, records: Vec<VectorRecord>) -> Result<usize, PineconeError> {
        let total = records.len();
        let mut batches: Vec<Vec<VectorRecord>> = Vec::new();
        let mut current = Vec::new();
        for record in records {
            current.push(record);
            if current.len() == UPSERT_BATCH_SIZE {
                batches.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            batches.push(current);
        }

        for batch in batches {
            let request = UpsertRequest { vectors: batch };
            let response = self
                .client
                .post(self.index_url("/vectors/upsert"))
                .header("Api-Key", &self.config.api_key)
                .json(&request)
                .send()
                .await
                .map_err(map_request_error)?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(PineconeError::ServiceError(format!(
                    "HTTP {}: {}",
                    status, body
                )));
            }
        }

        Ok(total)
    }
}

// ============================================================================
// 检索器
// ============================================================================

/// Pinecone 检索器
///
/// 实现 RetrieverPort：先将查询嵌入为向量，再做相似度查询。
/// 结果按相关度降序，不去重。
pub struct PineconeRetriever {
    index: PineconeIndex,
    embedder: Arc<dyn EmbeddingPort>,
}

impl PineconeRetriever {
    pub fn new(index: PineconeIndex, embedder: Arc<dyn EmbeddingPort>) -> Self {
        Self { index, embedder }
    }
}

#[async_trait]
impl RetrieverPort for PineconeRetriever {
    async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ContextChunk>, RetrievalError> {
        let mut vectors = self
            .embedder
            .embed(&[query.to_string()])
            .await
            .map_err(|e| RetrievalError::Embedding(e.to_string()))?;

        let vector = if vectors.is_empty() {
            return Err(RetrievalError::Embedding(
                "no embedding returned for query".to_string(),
            ));
        } else {
            vectors.swap_remove(0)
        };

        let matches = self.index.query(vector, k).await?;

        tracing::debug!(matches = matches.len(), top_k = k, "Context retrieved");

        Ok(matches
            .into_iter()
            .map(|(score, meta)| ContextChunk {
                text: meta.text,
                score,
                source: meta.source,
            })
            .collect())
    }
}

// ============================================================================
// 控制面（索引构建时使用）
// ============================================================================

#[derive(Debug, Serialize)]
struct CreateIndexRequest {
    name: String,
    dimension: usize,
    metric: &'static str,
    spec: IndexSpec,
}

#[derive(Debug, Serialize)]
struct IndexSpec {
    serverless: ServerlessSpec,
}

#[derive(Debug, Serialize)]
struct ServerlessSpec {
    cloud: &'static str,
    region: &'static str,
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
    status: IndexStatus,
}

#[derive(Debug, Deserialize)]
struct IndexStatus {
    ready: bool,
}

/// Pinecone 控制面客户端
pub struct PineconeAdmin {
    client: Client,
    api_key: String,
}

impl PineconeAdmin {
    pub fn new(api_key: impl Into<String>) -> Result<Self, PineconeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PineconeError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// 查询索引描述；索引不存在时返回 None
    pub async fn describe_index(
        &self,
        name: &str,
    ) -> Result<Option<(String, bool)>, PineconeError> {
        let response = self
            .client
            .get(format!("{}/indexes/{}", CONTROL_PLANE_URL, name))
            .header("Api-Key", &self.api_key)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PineconeError::ServiceError(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: IndexDescription = response
            .json()
            .await
            .map_err(|e| PineconeError::InvalidResponse(e.to_string()))?;

        Ok(Some((body.host, body.status.ready)))
    }

    /// 创建 serverless 索引（cosine 度量）
    pub async fn create_index(&self, name: &str, dimension: usize) -> Result<(), PineconeError> {
        let request = CreateIndexRequest {
            name: name.to_string(),
            dimension,
            metric: "cosine",
            spec: IndexSpec {
                serverless: ServerlessSpec {
                    cloud: "aws",
                    region: "us-east-1",
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/indexes", CONTROL_PLANE_URL))
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PineconeError::ServiceError(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        tracing::info!(index = name, dimension, "Pinecone index created");
        Ok(())
    }

    /// 等待索引就绪，返回数据面地址
    pub async fn wait_ready(&self, name: &str, max_attempts: u32) -> Result<String, PineconeError> {
        for attempt in 0..max_attempts {
            if let Some((host, ready)) = self.describe_index(name).await? {
                if ready {
                    return Ok(host);
                }
            }
            tracing::debug!(index = name, attempt, "Index not ready yet");
            tokio::time::sleep(Duration::from_secs(2)).await;
        }

        Err(PineconeError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_wire_format() {
        let request = QueryRequest {
            vector: vec![0.1, 0.2],
            top_k: 3,
            include_metadata: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["topK"], 3);
        assert_eq!(json["includeMetadata"], true);
    }

    #[test]
    fn test_query_response_parsing() {
        let json = r#"{"matches":[
            {"id":"c1","score":0.92,"metadata":{"text":"chunk one","source":"a.txt"}},
            {"id":"c2","score":0.85,"metadata":{"text":"chunk two"}}
        ]}"#;
        let parsed: QueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.matches.len(), 2);
        assert_eq!(parsed.matches[0].metadata.as_ref().unwrap().text, "chunk one");
        assert!(parsed.matches[1].metadata.as_ref().unwrap().source.is_none());
    }

    #[test]
    fn test_matches_without_metadata_skipped() {
        let json = r#"{"matches":[{"id":"c1","score":0.9}]}"#;
        let parsed: QueryResponse = serde_json::from_str(json).unwrap();
        let usable: Vec<_> = parsed
            .matches
            .into_iter()
            .filter_map(|m| m.metadata.map(|meta| (m.score, meta)))
            .collect();
        assert!(usable.is_empty());
    }

    #[test]
    fn test_index_url_accepts_bare_host() {
        let index = PineconeIndex::new(PineconeConfig {
            api_key: "key".to_string(),
            index_host: "medical-chatbot-abc123.svc.pinecone.io".to_string(),
            timeout_secs: 10,
        })
        .unwrap();
        assert_eq!(
            index.index_url("/query"),
            "https://medical-chatbot-abc123.svc.pinecone.io/query"
        );
    }

    #[test]
    fn test_index_url_accepts_full_url() {
        let index = PineconeIndex::new(PineconeConfig {
            api_key: "key".to_string(),
            index_host: "https://medical-chatbot-abc123.svc.pinecone.io/".to_string(),
            timeout_secs: 10,
        })
        .unwrap();
        assert_eq!(
            index.index_url("/query"),
            "https://medical-chatbot-abc123.svc.pinecone.io/query"
        );
    }
}
