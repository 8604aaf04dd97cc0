//! Remedi - 医疗问答 RAG 服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Query 值对象、文档分块器
//!
//! 应用层 (application/):
//! - Ports: 端口定义（AnswerCache, Retriever, Generation, Speech, Embedding, AudioStorage）
//! - RagService: 文本问答编排（缓存 → 检索 → prompt → 生成 → 回写）
//! - VoiceService: 语音问答编排（临时落盘 → 转写 → RAG → 合成）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Cache: Redis 答案缓存 + 空对象回退
//! - Adapters: OpenAI（生成/嵌入/语音）、Pinecone（向量索引）
//! - Storage: 临时音频文件

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
