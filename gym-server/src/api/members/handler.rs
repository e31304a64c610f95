//! Member API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::models::{Member, MemberDraft, MemberPatch, MemberUpdate, RenewalRequest};

use crate::audit_log;
use crate::core::ServerState;
use crate::membership::{search_members, validate_member_patch, validate_new_member, validate_renewal};
use crate::utils::validation::MAX_SHORT_TEXT_LEN;
use crate::utils::{ApiResponse, AppError, AppJson, AppPath, AppResult};

#[derive(serde::Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

async fn load(state: &ServerState, id: i64) -> AppResult<Member> {
    state
        .members
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::member_not_found(id))
}

/// GET /api/members - 获取所有会员 (最新优先)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Member>>> {
    let members = state.members.find_all().await?;
    Ok(Json(members))
}

/// GET /api/members/search?q=xxx - 按姓名或手机号搜索
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Member>>> {
    if query.q.chars().count() > MAX_SHORT_TEXT_LEN {
        return Err(AppError::validation(format!(
            "Search query is too long (max {MAX_SHORT_TEXT_LEN} chars)"
        )));
    }

    let members = state.members.find_all().await?;
    let found: Vec<Member> = search_members(&members, &query.q)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(found))
}

/// GET /api/members/:id - 获取单个会员
pub async fn get_by_id(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Member>> {
    Ok(Json(load(&state, id).await?))
}

/// POST /api/members - 创建会员
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<MemberDraft>,
) -> AppResult<Json<Member>> {
    let new_member = validate_new_member(&payload, &state.plans, state.today())?;
    let member = state.members.create(new_member).await?;

    audit_log!(
        "member_created",
        format!("member:{}", member.id),
        format!("plan={} expiry={}", member.plan_type, member.expiry_date)
    );

    Ok(Json(member))
}

/// PUT /api/members/:id - 编辑联系方式与付款信息
pub async fn update(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<MemberPatch>,
) -> AppResult<Json<Member>> {
    let changes = validate_member_patch(&payload)?;
    if changes.is_empty() {
        return Ok(Json(load(&state, id).await?));
    }

    let member = state.members.update(id, changes).await?;
    audit_log!("member_updated", format!("member:{id}"));

    Ok(Json(member))
}

/// DELETE /api/members/:id - 永久删除会员
pub async fn delete(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<ApiResponse<()>> {
    state.members.delete(id).await?;
    audit_log!("member_deleted", format!("member:{id}"));

    Ok(ApiResponse::ok())
}

/// POST /api/members/:id/renew - 续费，开始新的会员周期
pub async fn renew(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<RenewalRequest>,
) -> AppResult<Json<Member>> {
    let member = load(&state, id).await?;
    let terms = validate_renewal(&payload, &state.plans, state.today())?;
    let renewed = terms.apply_to(&member);

    let stored = state
        .members
        .update(id, MemberUpdate::period_of(&renewed))
        .await?;

    audit_log!(
        "member_renewed",
        format!("member:{id}"),
        format!("plan={} expiry={}", stored.plan_type, stored.expiry_date)
    );

    Ok(Json(stored))
}
