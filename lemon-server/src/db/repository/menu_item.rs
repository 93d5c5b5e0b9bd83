//! Menu Item Repository
//!
//! Items are always read joined with their category so the API can nest it.

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Category, MenuItem, MenuItemOrdering, MenuItemQuery, PageWindow};
use sqlx::SqlitePool;

const SELECT_JOINED: &str = "SELECT m.id, m.title, m.price, m.featured, c.id AS category_id, c.title AS category_title, c.slug AS category_slug FROM menu_item m JOIN category c ON c.id = m.category_id";

const FILTER: &str = "WHERE (?1 IS NULL OR c.slug = ?1) AND (?2 IS NULL OR m.featured = ?2) AND (?3 IS NULL OR m.title LIKE ?3 OR c.title LIKE ?3)";

#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    title: String,
    price: f64,
    featured: bool,
    category_id: i64,
    category_title: String,
    category_slug: String,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            price: row.price,
            featured: row.featured,
            category: Category {
                id: row.category_id,
                title: row.category_title,
                slug: row.category_slug,
            },
        }
    }
}

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
}

fn title_taken(title: &str) -> RepoError {
    RepoError::Business(
        ErrorCode::MenuItemTitleExists,
        format!("Menu item with title '{title}' already exists"),
    )
}

async fn ensure_category(pool: &SqlitePool, category_id: i64) -> RepoResult<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM category WHERE id = ?")
        .bind(category_id)
        .fetch_optional(pool)
        .await?;
    if found.is_none() {
        return Err(RepoError::Validation(format!(
            "category_id {category_id} does not reference an existing category"
        )));
    }
    Ok(())
}

/// Filtered, ordered page of menu items plus the total match count
pub async fn find_page(
    pool: &SqlitePool,
    query: &MenuItemQuery,
    window: PageWindow,
) -> RepoResult<(Vec<MenuItem>, i64)> {
    let search = query.search.as_ref().map(|s| format!("%{}%", s.trim()));
    let ordering = query.ordering.unwrap_or(MenuItemOrdering::TitleAsc);

    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM menu_item m JOIN category c ON c.id = m.category_id {FILTER}"
    ))
    .bind(query.category.as_deref())
    .bind(query.featured)
    .bind(search.as_deref())
    .fetch_one(pool)
    .await?;

    let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
        "{SELECT_JOINED} {FILTER} ORDER BY {} LIMIT ?4 OFFSET ?5",
        ordering.sql()
    ))
    .bind(query.category.as_deref())
    .bind(query.featured)
    .bind(search.as_deref())
    .bind(window.per_page)
    .bind(window.offset())
    .fetch_all(pool)
    .await?;

    Ok((rows.into_iter().map(MenuItem::from).collect(), total))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let row = sqlx::query_as::<_, MenuItemRow>(&format!("{SELECT_JOINED} WHERE m.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(MenuItem::from))
}

/// Current catalog price
pub async fn find_price(pool: &SqlitePool, id: i64) -> RepoResult<Option<f64>> {
    let price = sqlx::query_scalar("SELECT price FROM menu_item WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(price)
}

pub async fn create(
    pool: &SqlitePool,
    title: &str,
    price: f64,
    featured: bool,
    category_id: i64,
) -> RepoResult<MenuItem> {
    ensure_category(pool, category_id).await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO menu_item (title, price, featured, category_id) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(title)
    .bind(price)
    .bind(featured)
    .bind(category_id)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => title_taken(title),
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// Partial update; `None` keeps the stored value
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    title: Option<&str>,
    price: Option<f64>,
    featured: Option<bool>,
    category_id: Option<i64>,
) -> RepoResult<MenuItem> {
    if let Some(category_id) = category_id {
        ensure_category(pool, category_id).await?;
    }

    let rows = sqlx::query(
        "UPDATE menu_item SET title = COALESCE(?1, title), price = COALESCE(?2, price), featured = COALESCE(?3, featured), category_id = COALESCE(?4, category_id) WHERE id = ?5",
    )
    .bind(title)
    .bind(price)
    .bind(featured)
    .bind(category_id)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => title_taken(title.unwrap_or_default()),
        other => other,
    })?;

    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Delete an item that no order references. Cart lines go with it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    if find_price(pool, id).await?.is_none() {
        return Err(not_found(id));
    }

    let ordered: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_item WHERE menu_item_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if ordered > 0 {
        return Err(RepoError::Business(
            ErrorCode::MenuItemInUse,
            format!("Menu item {id} appears in {ordered} order line(s)"),
        ));
    }

    sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
