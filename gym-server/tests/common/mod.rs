//! In-process test harness: router over an in-memory database

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use gym_server::core::{Config, ServerState};
use gym_server::db::DbService;
use gym_server::db::repository::SqliteMemberRepository;
use gym_server::notify::DeepLinkDispatcher;
use http::{Method, Request, StatusCode};
use serde_json::Value;
use shared::models::{PlanCatalog, ReminderChannel};
use tower::ServiceExt;

pub async fn test_app() -> Router {
    test_app_with_channels(&ReminderChannel::ALL).await
}

pub async fn test_app_with_channels(channels: &[ReminderChannel]) -> Router {
    let db = DbService::in_memory().await.unwrap();
    let state = ServerState::new(
        Config::default(),
        Arc::new(SqliteMemberRepository::new(db.pool)),
        Arc::new(PlanCatalog::default()),
        Arc::new(DeepLinkDispatcher::new(channels.iter().copied())),
    );
    gym_server::api::build_router(state)
}

pub async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::POST, uri, Some(body)).await
}

/// POST a body that is sent as-is, for malformed JSON cases
pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Method::DELETE, uri, None).await
}

/// Create a member and return its id
pub async fn create_member(app: &Router, name: &str, mobile: &str, plan: &str, join_date: &str) -> i64 {
    let (status, body) = post(
        app,
        "/api/members",
        serde_json::json!({
            "name": name,
            "mobile": mobile,
            "gender": "Female",
            "plan_type": plan,
            "amount_paid": "1000",
            "due_amount": "",
            "join_date": join_date,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["id"].as_i64().unwrap()
}
