//! Reminder API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{DispatchReceipt, ReminderCandidate, SendReminderRequest};

use crate::audit_log;
use crate::core::ServerState;
use crate::membership::{build_reminder_text, reminder_candidates};
use crate::utils::time::resolve_as_of;
use crate::utils::{AppError, AppJson, AppPath, AppResult};

#[derive(Deserialize)]
pub struct ReminderQuery {
    /// YYYY-MM-DD, defaults to today in the business timezone
    pub as_of: Option<String>,
}

#[derive(Serialize)]
pub struct ReminderList {
    pub as_of: NaiveDate,
    pub candidates: Vec<ReminderCandidate>,
}

/// GET /api/reminders?as_of=YYYY-MM-DD - 需要提醒的会员
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ReminderQuery>,
) -> AppResult<Json<ReminderList>> {
    let as_of = resolve_as_of(query.as_of.as_deref(), state.config.timezone)?;
    let members = state.members.find_all().await?;

    Ok(Json(ReminderList {
        as_of,
        candidates: reminder_candidates(&members, as_of),
    }))
}

/// POST /api/reminders/:id/send - 通过指定渠道发送提醒
pub async fn send(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<SendReminderRequest>,
) -> AppResult<Json<DispatchReceipt>> {
    let member = state
        .members
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::member_not_found(id))?;

    let channel = payload.channel().map_err(|e| {
        AppError::validation(e.to_string())
            .with_detail("field", "channel")
            .with_detail("reason", "unknown_channel")
    })?;

    let text = build_reminder_text(&member);
    let receipt = state
        .dispatcher
        .send(channel, &member.mobile, &text)
        .await?;

    audit_log!("reminder_sent", format!("member:{id}"), channel.as_str());

    Ok(Json(receipt))
}
