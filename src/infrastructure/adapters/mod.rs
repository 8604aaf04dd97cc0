//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod openai;
pub mod pinecone;

pub use openai::{OpenAiChatClient, OpenAiConfig, OpenAiEmbeddingClient, OpenAiSpeechClient};
pub use pinecone::{
    ChunkMetadata, PineconeAdmin, PineconeConfig, PineconeError, PineconeIndex,
    PineconeRetriever, VectorRecord,
};
