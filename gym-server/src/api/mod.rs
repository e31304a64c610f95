//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`plans`] - 套餐目录
//! - [`members`] - 会员管理与续费
//! - [`reminders`] - 续费提醒
//!
//! 成功时直接返回 JSON 数据；失败时返回 [`ApiResponse`](crate::utils::ApiResponse) 错误信封。

pub mod health;
pub mod members;
pub mod plans;
pub mod reminders;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a fully configured application with all middleware and state
///
/// Used by the HTTP server and by in-process tests.
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(plans::router())
        .merge(members::router())
        .merge(reminders::router())
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
