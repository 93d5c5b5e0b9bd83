//! User Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::UserInfo;
use sqlx::SqlitePool;

/// Stored user record (includes the password hash)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub is_admin: bool,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<UserRow>> {
    let user = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, email, hashed_password, is_admin FROM app_user WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<UserRow>> {
    let user = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, email, hashed_password, is_admin FROM app_user WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    hashed_password: &str,
    is_admin: bool,
) -> RepoResult<UserRow> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO app_user (username, email, hashed_password, is_admin) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(username)
    .bind(email)
    .bind(hashed_password)
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Business(
            ErrorCode::UsernameExists,
            format!("Username '{username}' is already taken"),
        ),
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Group names the user belongs to, sorted
pub async fn group_names(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT g.name FROM user_group g JOIN user_group_member m ON m.group_id = g.id WHERE m.user_id = ? ORDER BY g.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

/// Public view of a user with fresh group memberships
pub async fn find_info(pool: &SqlitePool, id: i64) -> RepoResult<Option<UserInfo>> {
    let Some(user) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let groups = group_names(pool, id).await?;
    Ok(Some(UserInfo {
        id: user.id,
        username: user.username,
        email: user.email,
        is_admin: user.is_admin,
        groups,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::group;
    use crate::db::repository::testing::test_pool;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let user = create(&pool, "mario", "mario@example.com", "hash", false)
            .await
            .unwrap();
        assert_eq!(user.username, "mario");
        assert!(!user.is_admin);

        let found = find_by_username(&pool, "mario").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(find_by_username(&pool, "luigi").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let pool = test_pool().await;
        create(&pool, "mario", "", "hash", false).await.unwrap();
        let err = create(&pool, "mario", "", "hash", false).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::UsernameExists, _)));
    }

    #[tokio::test]
    async fn test_info_includes_groups() {
        let pool = test_pool().await;
        let user = create(&pool, "adrian", "", "hash", false).await.unwrap();
        group::add_member(&pool, user.id, "Manager").await.unwrap();
        group::add_member(&pool, user.id, "Customer").await.unwrap();

        let info = find_info(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(info.groups, vec!["Customer".to_string(), "Manager".to_string()]);
        assert!(find_info(&pool, 999).await.unwrap().is_none());
    }
}
