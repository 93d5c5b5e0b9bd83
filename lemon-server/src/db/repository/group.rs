//! Group Membership Repository
//!
//! Groups are looked up by name. Membership rows use the composite key
//! `(user_id, group_id)`, so adding twice is a no-op.

use super::RepoResult;
use crate::auth::Role;
use shared::models::GroupMember;
use sqlx::SqlitePool;

/// Create the group if absent, returning its id
pub async fn ensure_group(pool: &SqlitePool, name: &str) -> RepoResult<i64> {
    sqlx::query("INSERT OR IGNORE INTO user_group (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    let id: i64 = sqlx::query_scalar("SELECT id FROM user_group WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

/// Create the three role groups
pub async fn ensure_default_groups(pool: &SqlitePool) -> RepoResult<()> {
    for role in Role::ALL {
        ensure_group(pool, role.group_name()).await?;
    }
    Ok(())
}

pub async fn list_members(pool: &SqlitePool, group: &str) -> RepoResult<Vec<GroupMember>> {
    let members = sqlx::query_as::<_, GroupMember>(
        "SELECT u.id, u.username, u.email FROM app_user u JOIN user_group_member m ON m.user_id = u.id JOIN user_group g ON g.id = m.group_id WHERE g.name = ? ORDER BY u.id",
    )
    .bind(group)
    .fetch_all(pool)
    .await?;
    Ok(members)
}

/// Add a user to a group. Returns `false` when the membership already existed.
pub async fn add_member(pool: &SqlitePool, user_id: i64, group: &str) -> RepoResult<bool> {
    let group_id = ensure_group(pool, group).await?;
    let result =
        sqlx::query("INSERT OR IGNORE INTO user_group_member (user_id, group_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(group_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove a user from a group. Returns `false` when the user was not a member.
pub async fn remove_member(pool: &SqlitePool, user_id: i64, group: &str) -> RepoResult<bool> {
    let result = sqlx::query(
        "DELETE FROM user_group_member WHERE user_id = ? AND group_id = (SELECT id FROM user_group WHERE name = ?)",
    )
    .bind(user_id)
    .bind(group)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn is_member(pool: &SqlitePool, user_id: i64, group: &str) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM user_group_member m JOIN user_group g ON g.id = m.group_id WHERE m.user_id = ? AND g.name = ?",
    )
    .bind(user_id)
    .bind(group)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}
