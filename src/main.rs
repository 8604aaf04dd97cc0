//! Remedi - 医疗问答 RAG 服务

use std::sync::Arc;

use remedi::application::{RagService, VoiceService};
use remedi::config::{load_config, print_config};
use remedi::infrastructure::adapters::{
    OpenAiChatClient, OpenAiConfig, OpenAiEmbeddingClient, OpenAiSpeechClient, PineconeConfig,
    PineconeIndex, PineconeRetriever,
};
use remedi::infrastructure::http::{AppState, HttpServer, ServerConfig};
use remedi::infrastructure::{select_backend, CacheOptions, FsAudioStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    // 凭证缺失在这里直接失败，进程拒绝启动
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let level = if config.server.debug {
        "debug"
    } else {
        config.log.level.as_str()
    };
    let log_filter = format!("{},remedi={},tower_http=debug", level, level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Remedi - 医疗问答 RAG 服务");
    print_config(&config);

    if config.pinecone.index_host.is_empty() {
        anyhow::bail!(
            "pinecone.index_host is required (set REMEDI_PINECONE__INDEX_HOST); \
             run build_index first to create the index"
        );
    }

    // 选择缓存后端（不可用时退回空对象，不阻止启动）
    let cache = select_backend(&CacheOptions {
        url: config.cache.url.clone(),
        probe_timeout_secs: config.cache.probe_timeout_secs,
        op_timeout_secs: config.cache.op_timeout_secs,
    })
    .await;

    // OpenAI 客户端（生成/嵌入/语音共用配置）
    let openai_config = OpenAiConfig {
        api_key: config.openai.api_key.clone(),
        base_url: config.openai.base_url.clone(),
        chat_model: config.openai.chat_model.clone(),
        temperature: config.openai.temperature,
        max_tokens: config.openai.max_tokens,
        embedding_model: config.openai.embedding_model.clone(),
        transcribe_model: config.openai.transcribe_model.clone(),
        tts_model: config.openai.tts_model.clone(),
        tts_voice: config.openai.tts_voice.clone(),
        timeout_secs: config.openai.timeout_secs,
    };
    let generator = Arc::new(OpenAiChatClient::new(openai_config.clone())?);
    let embedder = Arc::new(OpenAiEmbeddingClient::new(openai_config.clone())?);
    let speech = Arc::new(OpenAiSpeechClient::new(openai_config)?);

    // Pinecone 检索器
    let index = PineconeIndex::new(PineconeConfig {
        api_key: config.pinecone.api_key.clone(),
        index_host: config.pinecone.index_host.clone(),
        timeout_secs: config.pinecone.timeout_secs,
    })?;
    let retriever = Arc::new(PineconeRetriever::new(index, embedder));

    // 用例服务
    let rag = Arc::new(
        RagService::new(cache, retriever, generator)
            .with_top_k(config.pinecone.top_k)
            .with_cache_ttl(config.cache.ttl_secs),
    );
    let voice = Arc::new(VoiceService::new(
        rag.clone(),
        Arc::new(FsAudioStore::system_temp()),
        speech.clone(),
        speech,
    ));

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(rag, voice);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
