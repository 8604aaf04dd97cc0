//! Page Handlers
//!
//! 内嵌的前端页面

use axum::response::Html;

/// 首页（GET /）
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../../../static/index.html"))
}
