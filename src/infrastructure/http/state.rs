//! Application State
//!
//! HTTP 层共享的应用状态：两个用例服务

use std::sync::Arc;

use crate::application::{RagService, VoiceService};

/// 应用状态
pub struct AppState {
    pub rag: Arc<RagService>,
    pub voice: Arc<VoiceService>,
}

impl AppState {
    pub fn new(rag: Arc<RagService>, voice: Arc<VoiceService>) -> Self {
        Self { rag, voice }
    }
}
