//! Group Membership Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{GroupMember, GroupMemberAdd, MessageResponse};
use sqlx::SqlitePool;

use crate::auth::{CurrentUser, Role, roles};
use crate::core::ServerState;
use crate::db::repository::{group, user};
use crate::security_log;
use crate::utils::ValidJson;

async fn list_members(pool: &SqlitePool, role: Role) -> AppResult<Json<Vec<GroupMember>>> {
    let members = group::list_members(pool, role.group_name()).await?;
    Ok(Json(members))
}

async fn add_member(
    pool: &SqlitePool,
    current: &CurrentUser,
    role: Role,
    payload: GroupMemberAdd,
) -> AppResult<MessageResponse> {
    let username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::required("username"))?;

    let target = user::find_by_username(pool, username).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::UserNotFound, format!("User {username} not found"))
            .with_detail("username", username)
    })?;

    let inserted = group::add_member(pool, target.id, role.group_name()).await?;
    security_log!(
        "INFO",
        "group_member_added",
        by = current.id,
        user_id = target.id,
        group = role.group_name(),
        new = inserted
    );

    Ok(MessageResponse::new(format!(
        "User {username} added to the {} group",
        role.group_name()
    )))
}

async fn remove_member(
    pool: &SqlitePool,
    current: &CurrentUser,
    role: Role,
    user_id: i64,
) -> AppResult<MessageResponse> {
    if user::find_by_id(pool, user_id).await?.is_none() {
        return Err(
            AppError::with_message(ErrorCode::UserNotFound, format!("User {user_id} not found"))
                .with_detail("user_id", user_id),
        );
    }

    if !group::remove_member(pool, user_id, role.group_name()).await? {
        return Err(AppError::with_message(
            ErrorCode::NotGroupMember,
            format!("User {user_id} does not belong to the {} group", role.group_name()),
        ));
    }

    security_log!(
        "INFO",
        "group_member_removed",
        by = current.id,
        user_id = user_id,
        group = role.group_name()
    );
    Ok(MessageResponse::new(format!(
        "User {user_id} removed from the {} group",
        role.group_name()
    )))
}

// ==================== Manager group ====================

/// GET /api/groups/manager/users
pub async fn list_managers(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<GroupMember>>> {
    roles::require_manage(&current)?;
    list_members(&state.pool, Role::Manager).await
}

/// POST /api/groups/manager/users `{username}` - 201
pub async fn add_manager(
    State(state): State<ServerState>,
    current: CurrentUser,
    ValidJson(payload): ValidJson<GroupMemberAdd>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    roles::require_manage(&current)?;
    let msg = add_member(&state.pool, &current, Role::Manager, payload).await?;
    Ok((StatusCode::CREATED, Json(msg)))
}

/// DELETE /api/groups/manager/users/{id}
pub async fn remove_manager(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    roles::require_admin(&current)?;
    let msg = remove_member(&state.pool, &current, Role::Manager, user_id).await?;
    Ok(Json(msg))
}

// ==================== Delivery crew group ====================

/// GET /api/groups/delivery-crew/users
pub async fn list_crew(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<GroupMember>>> {
    roles::require_manage(&current)?;
    list_members(&state.pool, Role::DeliveryCrew).await
}

/// POST /api/groups/delivery-crew/users `{username}` - 200
pub async fn add_crew(
    State(state): State<ServerState>,
    current: CurrentUser,
    ValidJson(payload): ValidJson<GroupMemberAdd>,
) -> AppResult<Json<MessageResponse>> {
    roles::require_manage(&current)?;
    let msg = add_member(&state.pool, &current, Role::DeliveryCrew, payload).await?;
    Ok(Json(msg))
}

/// DELETE /api/groups/delivery-crew/users/{id}
pub async fn remove_crew(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    roles::require_manage(&current)?;
    let msg = remove_member(&state.pool, &current, Role::DeliveryCrew, user_id).await?;
    Ok(Json(msg))
}
