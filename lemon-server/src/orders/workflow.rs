//! Order workflow
//!
//! Placement turns a cart into an order inside one transaction. Every other
//! operation dispatches on the caller's [`RoleView`].
//!
//! ```text
//! Placed (status = false) ──status: true──▶ Delivered (status = true)
//!        ▲                                        │
//!        └──────── status: false (manager) ───────┘
//! ```

use chrono::Utc;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderDetail, OrderPatch, OrderQuery, OrderReplace, Page, PageWindow};
use sqlx::SqlitePool;

use crate::auth::roles::{self, CurrentUser, Role, RoleView};
use crate::db::repository::order::OrderScope;
use crate::db::repository::{RepoError, cart, group, order, user};
use crate::orders::money;
use crate::security_log;

fn order_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
        .with_detail("order_id", id)
}

fn placement_failed(err: RepoError) -> AppError {
    tracing::error!(error = %err, "Order placement failed, transaction rolled back");
    AppError::new(ErrorCode::OrderPlacementFailed)
}

fn sqlx_placement_failed(err: sqlx::Error) -> AppError {
    placement_failed(RepoError::from(err))
}

fn forbidden(user: &CurrentUser, code: ErrorCode, order_id: i64) -> AppError {
    security_log!(
        "WARN",
        "order_access_denied",
        user_id = user.id,
        order_id = order_id,
        reason = code.message()
    );
    AppError::new(code).with_detail("order_id", order_id)
}

/// Check that the caller's role may see this order
fn authorize_read(user: &CurrentUser, order: &Order) -> AppResult<()> {
    match user.role_view() {
        RoleView::Manager => Ok(()),
        RoleView::DeliveryCrew(id) if order.delivery_crew_id == Some(id) => Ok(()),
        RoleView::DeliveryCrew(_) => Err(forbidden(user, ErrorCode::NotAssignedCrew, order.id)),
        RoleView::Customer(id) if order.user_id == id => Ok(()),
        RoleView::Customer(_) => Err(forbidden(user, ErrorCode::NotOrderOwner, order.id)),
    }
}

async fn load(pool: &SqlitePool, id: i64) -> AppResult<Order> {
    order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| order_not_found(id))
}

async fn load_detail(pool: &SqlitePool, id: i64) -> AppResult<OrderDetail> {
    order::find_detail(pool, id)
        .await?
        .ok_or_else(|| order_not_found(id))
}

/// A delivery crew target must exist and belong to the crew group
async fn ensure_crew_member(pool: &SqlitePool, user_id: i64) -> AppResult<()> {
    if user::find_by_id(pool, user_id).await?.is_none() {
        return Err(
            AppError::with_message(ErrorCode::UserNotFound, format!("User {user_id} not found"))
                .with_detail("user_id", user_id),
        );
    }
    if !group::is_member(pool, user_id, Role::DeliveryCrew.group_name()).await? {
        return Err(AppError::new(ErrorCode::NotDeliveryCrew).with_detail("user_id", user_id));
    }
    Ok(())
}

/// Turn the caller's cart into an order
///
/// All writes share one transaction; any early return drops it and rolls
/// back, so a failed placement leaves neither an order nor an emptied cart.
pub async fn place(pool: &SqlitePool, user: &CurrentUser) -> AppResult<OrderDetail> {
    let mut tx = pool.begin().await.map_err(sqlx_placement_failed)?;

    let lines = cart::list_lines(&mut *tx, user.id)
        .await
        .map_err(placement_failed)?;
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::CartEmpty));
    }

    let today = Utc::now().date_naive();
    let order_id = order::insert_header(&mut *tx, user.id, today)
        .await
        .map_err(placement_failed)?;

    let mut total = Decimal::ZERO;
    for line in &lines {
        order::insert_item(
            &mut *tx,
            order_id,
            line.menu_item_id,
            line.quantity,
            line.unit_price,
            line.line_total,
        )
        .await
        .map_err(placement_failed)?;
        total += money::to_decimal(line.line_total);
    }

    order::set_total(&mut *tx, order_id, money::to_f64(total))
        .await
        .map_err(placement_failed)?;
    cart::clear(&mut *tx, user.id)
        .await
        .map_err(placement_failed)?;

    tx.commit().await.map_err(sqlx_placement_failed)?;

    tracing::info!(
        order_id = order_id,
        user_id = user.id,
        lines = lines.len(),
        total = %money::round(total),
        "Order placed"
    );
    load_detail(pool, order_id).await
}

/// Orders visible to the caller
pub async fn list(
    pool: &SqlitePool,
    user: &CurrentUser,
    query: &OrderQuery,
) -> AppResult<Page<OrderDetail>> {
    let scope = match user.role_view() {
        RoleView::Manager => OrderScope::All,
        RoleView::DeliveryCrew(id) => OrderScope::AssignedTo(id),
        RoleView::Customer(id) => OrderScope::OwnedBy(id),
    };
    let window = PageWindow::new(query.page, query.per_page);
    let (orders, total) = order::find_page(pool, scope, query.status, window).await?;
    Ok(Page::new(orders, total, window))
}

pub async fn get(pool: &SqlitePool, user: &CurrentUser, id: i64) -> AppResult<OrderDetail> {
    let detail = load_detail(pool, id).await?;
    authorize_read(user, &detail.order)?;
    Ok(detail)
}

/// Partial update: crew assignment (manager) and/or status
pub async fn patch(
    pool: &SqlitePool,
    user: &CurrentUser,
    id: i64,
    patch: OrderPatch,
) -> AppResult<OrderDetail> {
    if patch.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyOrderUpdate));
    }

    let view = user.role_view();
    match view {
        RoleView::Customer(_) => {
            return Err(forbidden(user, ErrorCode::PermissionDenied, id));
        }
        RoleView::DeliveryCrew(_) if patch.delivery_crew.is_some() => {
            return Err(forbidden(user, ErrorCode::RoleRequired, id));
        }
        _ => {}
    }

    let current = load(pool, id).await?;
    if let RoleView::DeliveryCrew(crew_id) = view {
        if current.delivery_crew_id != Some(crew_id) {
            return Err(forbidden(user, ErrorCode::NotAssignedCrew, id));
        }
    }

    if let Some(Some(crew_id)) = patch.delivery_crew {
        ensure_crew_member(pool, crew_id).await?;
    }

    let updated = order::update(pool, id, patch.delivery_crew, patch.status).await?;
    tracing::info!(
        order_id = id,
        by = user.id,
        delivery_crew = ?updated.delivery_crew_id,
        status = updated.status,
        "Order updated"
    );
    load_detail(pool, id).await
}

/// Manager full replace of the mutable fields
pub async fn replace(
    pool: &SqlitePool,
    user: &CurrentUser,
    id: i64,
    body: OrderReplace,
) -> AppResult<OrderDetail> {
    roles::require_manage(user)?;
    load(pool, id).await?;
    if let Some(crew_id) = body.delivery_crew {
        ensure_crew_member(pool, crew_id).await?;
    }

    order::replace(pool, id, body.delivery_crew, body.status, body.date).await?;
    tracing::info!(order_id = id, by = user.id, "Order replaced");
    load_detail(pool, id).await
}

/// Manager hard delete; items cascade
pub async fn delete(pool: &SqlitePool, user: &CurrentUser, id: i64) -> AppResult<()> {
    roles::require_manage(user)?;
    order::delete(pool, id).await?;
    tracing::info!(order_id = id, by = user.id, "Order deleted");
    Ok(())
}
