//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use shared::error::{AppError, AppResult};
use shared::models::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

use crate::auth::{CurrentUser, Role, password};
use crate::core::ServerState;
use crate::db::repository::{group, user};
use crate::security_log;
use crate::utils::ValidJson;
use crate::utils::validation::{
    MAX_PASSWORD_LEN, MAX_USERNAME_LEN, MIN_PASSWORD_LEN, validate_email, validate_length,
    validate_required_text,
};

/// Fixed delay on the token endpoint so response time does not reveal
/// whether a username exists
const AUTH_FIXED_DELAY_MS: u64 = 300;

/// POST /api/auth/users - register a customer account
pub async fn register(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    let username = req.username.trim();
    validate_required_text(username, "username", MAX_USERNAME_LEN)?;
    validate_email(req.email.trim())?;
    validate_length(&req.password, "password", MIN_PASSWORD_LEN, MAX_PASSWORD_LEN)?;

    let hash = password::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let created = user::create(&state.pool, username, req.email.trim(), &hash, false).await?;
    group::add_member(&state.pool, created.id, Role::Customer.group_name()).await?;

    tracing::info!(user_id = created.id, username = %created.username, "User registered");

    let info = user::find_info(&state.pool, created.id)
        .await?
        .ok_or_else(|| AppError::internal("Registered user vanished"))?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// POST /api/auth/token - exchange credentials for a bearer token
pub async fn token(
    State(state): State<ServerState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let found = user::find_by_username(&state.pool, req.username.trim()).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Same error for unknown user and wrong password
    let found = match found {
        Some(u) if password::verify_password(&req.password, &u.hashed_password) => u,
        _ => {
            security_log!("WARN", "login_failed", username = req.username.as_str());
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service
        .generate_token(found.id, &found.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    let info = user::find_info(&state.pool, found.id)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    tracing::info!(user_id = info.id, username = %info.username, "User logged in");
    Ok(Json(LoginResponse { token, user: info }))
}

/// GET /api/auth/me
pub async fn me(user: CurrentUser) -> Json<UserInfo> {
    Json(user.into())
}
