//! Order Repository
//!
//! Writes used during placement take a `&mut SqliteConnection` so they run
//! inside the caller's transaction.

use std::collections::HashMap;

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::error::ErrorCode;
use shared::models::{Order, OrderDetail, OrderItem, PageWindow};
use sqlx::{SqliteConnection, SqlitePool};

const ORDER_COLUMNS: &str = "id, user_id, delivery_crew_id, status, total, date";
const ITEM_COLUMNS: &str = "id, order_id, menu_item_id, quantity, unit_price, line_total";
const SCOPE_FILTER: &str =
    "WHERE (?1 IS NULL OR user_id = ?1) AND (?2 IS NULL OR delivery_crew_id = ?2) AND (?3 IS NULL OR status = ?3)";

/// Which orders a listing may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    All,
    OwnedBy(i64),
    AssignedTo(i64),
}

impl OrderScope {
    fn owner(&self) -> Option<i64> {
        match self {
            Self::OwnedBy(id) => Some(*id),
            _ => None,
        }
    }

    fn crew(&self) -> Option<i64> {
        match self {
            Self::AssignedTo(id) => Some(*id),
            _ => None,
        }
    }
}

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::OrderNotFound, format!("Order {id} not found"))
}

// ==================== Placement (transactional) ====================

pub async fn insert_header(
    conn: &mut SqliteConnection,
    user_id: i64,
    date: NaiveDate,
) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO customer_order (user_id, status, total, date) VALUES (?, 0, 0, ?) RETURNING id",
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    menu_item_id: i64,
    quantity: i64,
    unit_price: f64,
    line_total: f64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_item (order_id, menu_item_id, quantity, unit_price, line_total) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(menu_item_id)
    .bind(quantity)
    .bind(unit_price)
    .bind(line_total)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn set_total(conn: &mut SqliteConnection, order_id: i64, total: f64) -> RepoResult<()> {
    sqlx::query("UPDATE customer_order SET total = ? WHERE id = ?")
        .bind(total)
        .bind(order_id)
        .execute(conn)
        .await?;
    Ok(())
}

// ==================== Reads ====================

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM customer_order WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_item WHERE order_id = ? ORDER BY id"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let items = find_items(pool, id).await?;
    Ok(Some(OrderDetail { order, items }))
}

/// Page of orders visible in `scope`, newest first, with their items
pub async fn find_page(
    pool: &SqlitePool,
    scope: OrderScope,
    status: Option<bool>,
    window: PageWindow,
) -> RepoResult<(Vec<OrderDetail>, i64)> {
    let total: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM customer_order {SCOPE_FILTER}"
    ))
    .bind(scope.owner())
    .bind(scope.crew())
    .bind(status)
    .fetch_one(pool)
    .await?;

    let page_ids = format!(
        "SELECT id FROM customer_order {SCOPE_FILTER} ORDER BY id DESC LIMIT ?4 OFFSET ?5"
    );

    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM customer_order WHERE id IN ({page_ids}) ORDER BY id DESC"
    ))
    .bind(scope.owner())
    .bind(scope.crew())
    .bind(status)
    .bind(window.per_page)
    .bind(window.offset())
    .fetch_all(pool)
    .await?;

    let items = sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_item WHERE order_id IN ({page_ids}) ORDER BY id"
    ))
    .bind(scope.owner())
    .bind(scope.crew())
    .bind(status)
    .bind(window.per_page)
    .bind(window.offset())
    .fetch_all(pool)
    .await?;

    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    let details = orders
        .into_iter()
        .map(|order| OrderDetail {
            items: by_order.remove(&order.id).unwrap_or_default(),
            order,
        })
        .collect();
    Ok((details, total))
}

// ==================== Updates ====================

/// Apply the present fields of a PATCH
///
/// `delivery_crew = Some(None)` clears the assignment.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    delivery_crew: Option<Option<i64>>,
    status: Option<bool>,
) -> RepoResult<Order> {
    let rows = sqlx::query(
        "UPDATE customer_order SET delivery_crew_id = CASE WHEN ?1 THEN ?2 ELSE delivery_crew_id END, status = COALESCE(?3, status) WHERE id = ?4",
    )
    .bind(delivery_crew.is_some())
    .bind(delivery_crew.flatten())
    .bind(status)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Overwrite the mutable header fields. Owner and total are untouched.
pub async fn replace(
    pool: &SqlitePool,
    id: i64,
    delivery_crew: Option<i64>,
    status: bool,
    date: NaiveDate,
) -> RepoResult<Order> {
    let rows = sqlx::query(
        "UPDATE customer_order SET delivery_crew_id = ?, status = ?, date = ? WHERE id = ?",
    )
    .bind(delivery_crew)
    .bind(status)
    .bind(date)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Hard delete; items cascade
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM customer_order WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::{seed_category, seed_menu_item, seed_user, test_pool};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    async fn seed_order(pool: &SqlitePool, user_id: i64, menu_item_id: i64) -> i64 {
        let mut conn = pool.acquire().await.unwrap();
        let id = insert_header(&mut conn, user_id, day()).await.unwrap();
        insert_item(&mut conn, id, menu_item_id, 2, 5.0, 10.0).await.unwrap();
        set_total(&mut conn, id, 10.0).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_delete_cascades_items() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "customer").await;
        let cat = seed_category(&pool, "mains").await;
        let item = seed_menu_item(&pool, "Pasta", 5.0, cat).await;
        let order_id = seed_order(&pool, user, item).await;
        assert_eq!(find_items(&pool, order_id).await.unwrap().len(), 1);

        delete(&pool, order_id).await.unwrap();

        let left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_item WHERE order_id = ?")
            .bind(order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(left, 0);
        assert!(matches!(
            delete(&pool, order_id).await.unwrap_err(),
            RepoError::Business(ErrorCode::OrderNotFound, _)
        ));
    }

    #[tokio::test]
    async fn test_scoped_listing() {
        let pool = test_pool().await;
        let alice = seed_user(&pool, "alice").await;
        let bob = seed_user(&pool, "bob").await;
        let crew = seed_user(&pool, "crew").await;
        let cat = seed_category(&pool, "mains").await;
        let item = seed_menu_item(&pool, "Pasta", 5.0, cat).await;

        let a1 = seed_order(&pool, alice, item).await;
        seed_order(&pool, alice, item).await;
        seed_order(&pool, bob, item).await;
        update(&pool, a1, Some(Some(crew)), None).await.unwrap();

        let window = PageWindow::new(None, None);
        let (all, total) = find_page(&pool, OrderScope::All, None, window).await.unwrap();
        assert_eq!((all.len(), total), (3, 3));
        assert!(all.iter().all(|o| o.items.len() == 1));

        let (mine, _) = find_page(&pool, OrderScope::OwnedBy(alice), None, window).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|o| o.order.user_id == alice));

        let (assigned, _) = find_page(&pool, OrderScope::AssignedTo(crew), None, window).await.unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].order.id, a1);

        let (delivered, _) = find_page(&pool, OrderScope::All, Some(true), window).await.unwrap();
        assert!(delivered.is_empty());
    }

    #[tokio::test]
    async fn test_patch_and_replace() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "customer").await;
        let crew = seed_user(&pool, "crew").await;
        let cat = seed_category(&pool, "mains").await;
        let item = seed_menu_item(&pool, "Pasta", 5.0, cat).await;
        let id = seed_order(&pool, user, item).await;

        let order = update(&pool, id, Some(Some(crew)), None).await.unwrap();
        assert_eq!(order.delivery_crew_id, Some(crew));
        assert!(!order.status);

        let order = update(&pool, id, None, Some(true)).await.unwrap();
        assert_eq!(order.delivery_crew_id, Some(crew));
        assert!(order.status);

        let order = update(&pool, id, Some(None), None).await.unwrap();
        assert_eq!(order.delivery_crew_id, None);

        let new_day = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let order = replace(&pool, id, Some(crew), false, new_day).await.unwrap();
        assert_eq!(order.date, new_day);
        assert_eq!(order.user_id, user);
        assert_eq!(order.total, 10.0);
    }
}
