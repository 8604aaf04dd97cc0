//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（缓存、检索、生成、语音、嵌入、临时存储）
//! - prompt: 系统指令与 prompt 组装
//! - rag: 文本问答编排服务
//! - voice: 语音问答编排服务
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod prompt;
pub mod rag;
pub mod voice;

pub use error::AnswerError;
pub use rag::{RagAnswer, RagService, DEFAULT_TOP_K};
pub use voice::{VoiceAnswer, VoiceService};

pub use ports::{
    // Answer cache
    cache_key,
    AnswerCachePort,
    CacheStats,
    DEFAULT_TTL_SECS,
    // Audio storage
    AudioStorageError,
    AudioStoragePort,
    // Embedding
    EmbeddingError,
    EmbeddingPort,
    // Generation
    GenerationError,
    GenerationPort,
    // Retriever
    ContextChunk,
    RetrievalError,
    RetrieverPort,
    // Speech
    SpeechError,
    SpeechToTextPort,
    TextToSpeechPort,
};
