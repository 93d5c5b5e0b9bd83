//! Order API Handlers
//!
//! Thin wrappers; the rules live in [`crate::orders::workflow`].

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{OrderDetail, OrderPatch, OrderQuery, OrderReplace, Page};

use crate::auth::{Identity, roles};
use crate::core::ServerState;
use crate::orders::workflow;
use crate::utils::{ValidJson, ValidQuery};

/// GET /api/orders?status=&page=&per_page=
pub async fn list(
    State(state): State<ServerState>,
    identity: Identity,
    ValidQuery(query): ValidQuery<OrderQuery>,
) -> AppResult<Json<Page<OrderDetail>>> {
    let user = roles::require_customer(identity)?;
    let page = workflow::list(&state.pool, &user, &query).await?;
    Ok(Json(page))
}

/// POST /api/orders - place an order from the caller's cart
pub async fn place(
    State(state): State<ServerState>,
    identity: Identity,
) -> AppResult<(StatusCode, Json<OrderDetail>)> {
    let user = roles::require_customer(identity)?;
    let detail = workflow::place(&state.pool, &user).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PATCH / DELETE /api/orders without an id
pub async fn missing_id(identity: Identity) -> AppResult<StatusCode> {
    roles::require_customer(identity)?;
    Err(AppError::new(ErrorCode::OrderIdRequired))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let user = roles::require_customer(identity)?;
    let detail = workflow::get(&state.pool, &user, id).await?;
    Ok(Json(detail))
}

/// PATCH /api/orders/{id} `{delivery_crew?, status?}`
pub async fn update(
    State(state): State<ServerState>,
    identity: Identity,
    Path(id): Path<i64>,
    ValidJson(patch): ValidJson<OrderPatch>,
) -> AppResult<Json<OrderDetail>> {
    let user = roles::require_customer(identity)?;
    let detail = workflow::patch(&state.pool, &user, id, patch).await?;
    Ok(Json(detail))
}

/// PUT /api/orders/{id} `{delivery_crew, status, date}`
pub async fn replace(
    State(state): State<ServerState>,
    identity: Identity,
    Path(id): Path<i64>,
    ValidJson(body): ValidJson<OrderReplace>,
) -> AppResult<Json<OrderDetail>> {
    let user = roles::require_customer(identity)?;
    let detail = workflow::replace(&state.pool, &user, id, body).await?;
    Ok(Json(detail))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    identity: Identity,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let user = roles::require_customer(identity)?;
    workflow::delete(&state.pool, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
