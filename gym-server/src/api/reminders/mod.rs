//! Renewal reminder API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reminders", get(handler::list))
        .route("/api/reminders/{id}/send", post(handler::send))
}
