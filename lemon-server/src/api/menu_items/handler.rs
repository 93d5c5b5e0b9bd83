//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{MenuItem, MenuItemCreate, MenuItemQuery, MenuItemUpdate, Page, PageWindow};

use crate::auth::{CurrentUser, roles};
use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::utils::validation::{validate_price, validate_title};
use crate::utils::{ValidJson, ValidQuery};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
}

/// GET /api/menu-items?category=&featured=&search=&ordering=&page=&per_page=
pub async fn list(
    State(state): State<ServerState>,
    ValidQuery(query): ValidQuery<MenuItemQuery>,
) -> AppResult<Json<Page<MenuItem>>> {
    let window = PageWindow::new(query.page, query.per_page);
    let (items, total) = menu_item::find_page(&state.pool, &query, window).await?;
    Ok(Json(Page::new(items, total, window)))
}

/// GET /api/menu-items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    ValidJson(payload): ValidJson<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    roles::require_manage(&current)?;

    let title = payload.title.trim();
    validate_title(title)?;
    let price = validate_price(payload.price)?;

    let item =
        menu_item::create(&state.pool, title, price, payload.featured, payload.category_id).await?;
    tracing::info!(menu_item_id = item.id, title = %item.title, by = current.id, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/menu-items/{id} - every field required
pub async fn replace(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    roles::require_manage(&current)?;

    let title = payload.title.trim();
    validate_title(title)?;
    let price = validate_price(payload.price)?;

    let item = menu_item::update(
        &state.pool,
        id,
        Some(title),
        Some(price),
        Some(payload.featured),
        Some(payload.category_id),
    )
    .await?;
    tracing::info!(menu_item_id = id, by = current.id, "Menu item replaced");
    Ok(Json(item))
}

/// PATCH /api/menu-items/{id} - only the present fields change
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    roles::require_manage(&current)?;

    let title = payload.title.as_deref().map(str::trim);
    if let Some(title) = title {
        validate_title(title)?;
    }
    let price = payload.price.map(validate_price).transpose()?;

    let item = menu_item::update(
        &state.pool,
        id,
        title,
        price,
        payload.featured,
        payload.category_id,
    )
    .await?;
    tracing::info!(menu_item_id = id, by = current.id, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/menu-items/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    roles::require_manage(&current)?;
    menu_item::delete(&state.pool, id).await?;
    tracing::info!(menu_item_id = id, by = current.id, "Menu item deleted");
    Ok(StatusCode::NO_CONTENT)
}
