//! Category Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::Category;
use sqlx::SqlitePool;

fn slug_taken(slug: &str) -> RepoError {
    RepoError::Business(
        ErrorCode::CategorySlugExists,
        format!("Category with slug '{slug}' already exists"),
    )
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT id, title, slug FROM category ORDER BY title, id")
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT id, title, slug FROM category WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, title: &str, slug: &str) -> RepoResult<Category> {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO category (title, slug) VALUES (?, ?) RETURNING id")
            .bind(title)
            .bind(slug)
            .fetch_one(pool)
            .await
            .map_err(|e| match RepoError::from(e) {
                RepoError::Duplicate(_) => slug_taken(slug),
                other => other,
            })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    title: Option<&str>,
    slug: Option<&str>,
) -> RepoResult<Category> {
    let rows = sqlx::query(
        "UPDATE category SET title = COALESCE(?1, title), slug = COALESCE(?2, slug) WHERE id = ?3",
    )
    .bind(title)
    .bind(slug)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => slug_taken(slug.unwrap_or_default()),
        other => other,
    })?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::Business(
            ErrorCode::CategoryNotFound,
            format!("Category {id} not found"),
        ));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Business(ErrorCode::CategoryNotFound, format!("Category {id} not found")))
}

/// Delete a category that has no menu items
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(RepoError::Business(
            ErrorCode::CategoryNotFound,
            format!("Category {id} not found"),
        ));
    }

    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if items > 0 {
        return Err(RepoError::Business(
            ErrorCode::CategoryHasMenuItems,
            format!("Category {id} still has {items} menu item(s)"),
        ));
    }

    sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::{seed_menu_item, test_pool};

    #[tokio::test]
    async fn test_crud() {
        let pool = test_pool().await;
        let cat = create(&pool, "Main Course", "main-course").await.unwrap();
        assert_eq!(cat.slug, "main-course");

        let updated = update(&pool, cat.id, Some("Mains"), None).await.unwrap();
        assert_eq!(updated.title, "Mains");
        assert_eq!(updated.slug, "main-course");

        assert_eq!(find_all(&pool).await.unwrap().len(), 1);
        delete(&pool, cat.id).await.unwrap();
        assert!(find_by_id(&pool, cat.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_slug() {
        let pool = test_pool().await;
        create(&pool, "Desserts", "desserts").await.unwrap();
        let err = create(&pool, "Sweets", "desserts").await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::CategorySlugExists, _)));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_menu_items() {
        let pool = test_pool().await;
        let cat = create(&pool, "Drinks", "drinks").await.unwrap();
        seed_menu_item(&pool, "Lemonade", 3.5, cat.id).await;

        let err = delete(&pool, cat.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::CategoryHasMenuItems, _)));
    }

    #[tokio::test]
    async fn test_missing_category() {
        let pool = test_pool().await;
        let err = update(&pool, 42, Some("x"), None).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::CategoryNotFound, _)));
        let err = delete(&pool, 42).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::CategoryNotFound, _)));
    }
}
