//! Chat HTTP Handlers
//!
//! /get 问答端点（GET query string 或 POST form 的 msg 字段）与 /stats

use axum::extract::{Form, Query, State};
use axum::Json;
use std::sync::Arc;

use crate::domain;
use crate::infrastructure::http::dto::{AnswerResponse, AskParams, StatsResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 问答（GET /get?msg=...）
pub async fn ask_get(
    State(state): State<Arc<AppState>>,
    params: Option<Query<AskParams>>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let params = params.map(|Query(p)| p).unwrap_or(AskParams { msg: None });
    ask(state, params).await
}

/// 问答（POST /get，form 字段 msg）
pub async fn ask_post(
    State(state): State<Arc<AppState>>,
    params: Option<Form<AskParams>>,
) -> Result<Json<AnswerResponse>, ApiError> {
    // 缺失或非 form 请求体按缺失 msg 处理
    let params = params.map(|Form(p)| p).unwrap_or(AskParams { msg: None });
    ask(state, params).await
}

async fn ask(state: Arc<AppState>, params: AskParams) -> Result<Json<AnswerResponse>, ApiError> {
    let msg = params
        .msg
        .ok_or_else(|| ApiError::BadRequest("No input".to_string()))?;

    // 空白输入在进入缓存/检索之前拒绝
    let query =
        domain::Query::new(msg).map_err(|_| ApiError::BadRequest("No input".to_string()))?;

    let result = state.rag.answer(&query).await?;

    Ok(Json(AnswerResponse {
        answer: result.answer,
        cached: result.cached,
    }))
}

/// 缓存与模型状态（GET /stats）
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        cache: state.rag.cache_stats().await,
        model: state.rag.model().to_string(),
    })
}
