//! 索引构建脚本
//!
//! 从数据目录加载 .txt/.md 文档，分块、嵌入并写入 Pinecone 索引。
//! 索引不存在时自动创建（serverless, cosine）。
//!
//! 用法: build_index [data_dir]（默认 data/）

use std::path::Path;

use remedi::application::ports::EmbeddingPort;
use remedi::config::load_config;
use remedi::domain::{split_text, SplitConfig};
use remedi::infrastructure::adapters::{
    ChunkMetadata, OpenAiConfig, OpenAiEmbeddingClient, PineconeAdmin, PineconeConfig,
    PineconeIndex, VectorRecord,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // 凭证缺失在这里直接失败
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());

    // 确保索引存在并就绪
    let admin = PineconeAdmin::new(&config.pinecone.api_key)?;
    let index_name = &config.pinecone.index_name;
    let host = match admin.describe_index(index_name).await? {
        Some((host, true)) => {
            tracing::info!(index = %index_name, "Index exists");
            host
        }
        Some((_, false)) => {
            tracing::info!(index = %index_name, "Index exists but not ready, waiting");
            admin.wait_ready(index_name, 30).await?
        }
        None => {
            tracing::info!(
                index = %index_name,
                dimension = config.pinecone.dimension,
                "Creating index"
            );
            admin
                .create_index(index_name, config.pinecone.dimension)
                .await?;
            admin.wait_ready(index_name, 60).await?
        }
    };

    // 加载并分块文档
    let documents = load_documents(Path::new(&data_dir))?;
    if documents.is_empty() {
        anyhow::bail!("No .txt/.md documents found in {}", data_dir);
    }
    tracing::info!(documents = documents.len(), dir = %data_dir, "Documents loaded");

    let split_config = SplitConfig::default();
    let mut chunks: Vec<(String, String, String)> = Vec::new();
    for (source, content) in &documents {
        let stem = Path::new(source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("doc");
        for (i, chunk) in split_text(content, &split_config).into_iter().enumerate() {
            chunks.push((format!("{}-{}", stem, i), chunk, source.clone()));
        }
    }
    tracing::info!(chunks = chunks.len(), "Documents split");

    // 嵌入
    let embedder = OpenAiEmbeddingClient::new(OpenAiConfig {
        api_key: config.openai.api_key.clone(),
        base_url: config.openai.base_url.clone(),
        embedding_model: config.openai.embedding_model.clone(),
        timeout_secs: config.openai.timeout_secs,
        ..Default::default()
    })?;
    let texts: Vec<String> = chunks.iter().map(|(_, text, _)| text.clone()).collect();
    let vectors = embedder.embed(&texts).await?;
    tracing::info!(vectors = vectors.len(), "Embeddings generated");

    // 写入索引
    let records: Vec<VectorRecord> = chunks
        .into_iter()
        .zip(vectors)
        .map(|((id, text, source), values)| VectorRecord {
            id,
            values,
            metadata: ChunkMetadata {
                text,
                source: Some(source),
            },
        })
        .collect();

    let index = PineconeIndex::new(PineconeConfig {
        api_key: config.pinecone.api_key.clone(),
        index_host: host,
        timeout_secs: config.pinecone.timeout_secs,
    })?;
    let count = index.upsert(records).await?;

    tracing::info!(vectors = count, index = %index_name, "Vector store created");
    Ok(())
}

/// 加载数据目录下的 .txt/.md 文档，返回 (相对路径, 内容)
fn load_documents(dir: &Path) -> anyhow::Result<Vec<(String, String)>> {
    let mut documents = Vec::new();

    for entry in std::fs::read_dir(dir)
        .map_err(|e| anyhow::anyhow!("Cannot read data dir {}: {}", dir.display(), e))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_text = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("txt") | Some("md")
        );
        if !is_text {
            continue;
        }

        let content = std::fs::read_to_string(&path)?;
        documents.push((path.display().to_string(), content));
    }

    // 固定顺序，保证 chunk id 可重现
    documents.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(documents)
}
