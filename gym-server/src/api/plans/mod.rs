//! Plan catalog API

use axum::{Json, Router, extract::State, routing::get};
use shared::models::Plan;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/plans", get(list))
}

/// GET /api/plans - 套餐目录
async fn list(State(state): State<ServerState>) -> Json<Vec<Plan>> {
    Json(state.plans.plans().to_vec())
}
