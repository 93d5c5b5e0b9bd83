//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::auth::{CurrentUser, roles};
use crate::core::ServerState;
use crate::db::repository::category;
use crate::utils::ValidJson;
use crate::utils::validation::{MAX_NAME_LEN, slugify, validate_required_text, validate_slug};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {id} not found"))
}

/// Explicit slug if given, otherwise derived from the title
fn resolve_slug(title: &str, slug: Option<&str>) -> AppResult<String> {
    let slug = match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => slugify(title),
    };
    validate_slug(&slug)?;
    Ok(slug)
}

/// GET /api/categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let found = category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(found))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    ValidJson(payload): ValidJson<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    roles::require_manage(&current)?;

    let title = payload.title.trim();
    validate_required_text(title, "title", MAX_NAME_LEN)?;
    let slug = resolve_slug(title, payload.slug.as_deref())?;

    let created = category::create(&state.pool, title, &slug).await?;
    tracing::info!(category_id = created.id, slug = %created.slug, by = current.id, "Category created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    ValidJson(payload): ValidJson<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    roles::require_manage(&current)?;

    let title = payload.title.as_deref().map(str::trim);
    if let Some(title) = title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    let slug = match payload.slug.as_deref() {
        Some(slug) => {
            let slug = slug.trim();
            validate_slug(slug)?;
            Some(slug)
        }
        None => None,
    };

    let updated = category::update(&state.pool, id, title, slug).await?;
    tracing::info!(category_id = id, by = current.id, "Category updated");
    Ok(Json(updated))
}

/// DELETE /api/categories/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    roles::require_manage(&current)?;
    category::delete(&state.pool, id).await?;
    tracing::info!(category_id = id, by = current.id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_slug() {
        assert_eq!(resolve_slug("Main Course", None).unwrap(), "main-course");
        assert_eq!(resolve_slug("Main Course", Some("  ")).unwrap(), "main-course");
        assert_eq!(resolve_slug("Main Course", Some("mains")).unwrap(), "mains");
        assert!(resolve_slug("!!!", None).is_err());
        assert!(resolve_slug("Mains", Some("bad slug")).is_err());
    }
}
