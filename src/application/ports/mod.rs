//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod answer_cache;
mod audio_storage;
mod embedding;
mod generation;
mod retriever;
mod speech;

pub use answer_cache::{cache_key, AnswerCachePort, CacheStats, DEFAULT_TTL_SECS};
pub use audio_storage::{AudioStorageError, AudioStoragePort};
pub use embedding::{EmbeddingError, EmbeddingPort};
pub use generation::{GenerationError, GenerationPort};
pub use retriever::{ContextChunk, RetrievalError, RetrieverPort};
pub use speech::{SpeechError, SpeechToTextPort, TextToSpeechPort};
