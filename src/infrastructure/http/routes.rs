//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping        GET           健康检查
//! - /api/mix-audio   POST/OPTIONS  语音片段 + 背景音乐 → WAV
//! - /api/gemini      POST/OPTIONS  剧本生成模型代理（多 Key 轮换）
//!
//! 其他方法返回 405

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route(
            "/mix-audio",
            post(handlers::mix_audio).options(handlers::preflight),
        )
        .route(
            "/gemini",
            post(handlers::generate_content).options(handlers::preflight),
        )
}
