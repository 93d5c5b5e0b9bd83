//! Cart API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CartAdd, CartLine, CartView};

use crate::auth::{Identity, roles};
use crate::core::ServerState;
use crate::db::repository::{cart, menu_item};
use crate::orders::money;
use crate::utils::ValidJson;
use crate::utils::validation::validate_quantity;

/// GET /api/cart/menu-items
pub async fn list(
    State(state): State<ServerState>,
    identity: Identity,
) -> AppResult<Json<CartView>> {
    let user = roles::require_customer(identity)?;
    let items = cart::list_lines(&state.pool, user.id).await?;
    let total = money::sum(items.iter().map(|l| l.line_total));
    Ok(Json(CartView { items, total }))
}

/// POST /api/cart/menu-items `{menu_item_id, quantity}`
///
/// A missing quantity counts as 1.
pub async fn add(
    State(state): State<ServerState>,
    identity: Identity,
    ValidJson(payload): ValidJson<CartAdd>,
) -> AppResult<(StatusCode, Json<CartLine>)> {
    let user = roles::require_customer(identity)?;

    let menu_item_id = payload
        .menu_item_id
        .ok_or_else(|| AppError::required("menu_item_id"))?;
    let quantity = payload.quantity.unwrap_or(1);
    validate_quantity(quantity)?;

    let unit_price = menu_item::find_price(&state.pool, menu_item_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("Menu item {menu_item_id} not found"),
            )
        })?;

    let line = cart::add_item(&state.pool, user.id, menu_item_id, quantity, unit_price).await?;
    tracing::debug!(
        user_id = user.id,
        menu_item_id = menu_item_id,
        quantity = line.quantity,
        "Cart line updated"
    );
    Ok((StatusCode::CREATED, Json(line)))
}

/// DELETE /api/cart/menu-items
pub async fn clear(
    State(state): State<ServerState>,
    identity: Identity,
) -> AppResult<StatusCode> {
    let user = roles::require_customer(identity)?;
    let removed = cart::clear(&state.pool, user.id).await?;
    tracing::debug!(user_id = user.id, removed = removed, "Cart cleared");
    Ok(StatusCode::NO_CONTENT)
}
