//! Cart Repository
//!
//! One line per (user, menu item). The unit price is pinned when the line is
//! first created; later adds only grow the quantity.

use super::{RepoError, RepoResult};
use crate::orders::money;
use crate::utils::validation::MAX_QUANTITY;
use shared::error::ErrorCode;
use shared::models::CartLine;
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT_LINES: &str = "SELECT l.id, l.user_id, l.menu_item_id, m.title AS menu_item_title, l.quantity, l.unit_price, l.line_total FROM cart_line l JOIN menu_item m ON m.id = l.menu_item_id";

/// Add `quantity` of an item, creating the line at `unit_price` if absent
///
/// The upsert and the line total refresh share one transaction, so two
/// concurrent adds serialize on the SQLite write lock. A merge that would
/// push the line past `MAX_QUANTITY` leaves the line untouched.
pub async fn add_item(
    pool: &SqlitePool,
    user_id: i64,
    menu_item_id: i64,
    quantity: i64,
    unit_price: f64,
) -> RepoResult<CartLine> {
    let mut tx = pool.begin().await?;

    let upserted: Option<(i64, i64, f64)> = sqlx::query_as(
        "INSERT INTO cart_line (user_id, menu_item_id, quantity, unit_price, line_total) VALUES (?1, ?2, ?3, ?4, 0) \
         ON CONFLICT (user_id, menu_item_id) DO UPDATE SET quantity = cart_line.quantity + excluded.quantity \
         WHERE cart_line.quantity + excluded.quantity <= ?5 \
         RETURNING id, quantity, unit_price",
    )
    .bind(user_id)
    .bind(menu_item_id)
    .bind(quantity)
    .bind(unit_price)
    .bind(MAX_QUANTITY)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((line_id, total_qty, pinned_price)) = upserted else {
        return Err(RepoError::Business(
            ErrorCode::InvalidQuantity,
            format!("Cart line quantity cannot exceed {MAX_QUANTITY}"),
        ));
    };

    sqlx::query("UPDATE cart_line SET line_total = ? WHERE id = ?")
        .bind(money::line_total(pinned_price, total_qty))
        .bind(line_id)
        .execute(&mut *tx)
        .await?;

    let line = sqlx::query_as::<_, CartLine>(&format!("{SELECT_LINES} WHERE l.id = ?"))
        .bind(line_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(line)
}

pub async fn list_lines<'e, E>(executor: E, user_id: i64) -> RepoResult<Vec<CartLine>>
where
    E: SqliteExecutor<'e>,
{
    let lines = sqlx::query_as::<_, CartLine>(&format!(
        "{SELECT_LINES} WHERE l.user_id = ? ORDER BY l.id"
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await?;
    Ok(lines)
}

/// Delete every line of the user's cart, returning how many were removed
pub async fn clear<'e, E>(executor: E, user_id: i64) -> RepoResult<u64>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM cart_line WHERE user_id = ?")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
