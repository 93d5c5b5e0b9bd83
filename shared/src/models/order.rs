//! Order Model
//!
//! An order is a snapshot of a user's cart at placement time. Items are
//! immutable once written; only `delivery_crew_id`, `status` and `date`
//! change afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::serde_helpers::double_option;

/// Order header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Owner, never changes after placement
    pub user_id: i64,
    pub delivery_crew_id: Option<i64>,
    /// `false` = placed, `true` = delivered
    pub status: bool,
    pub total: f64,
    pub date: NaiveDate,
}

/// Order line copied from a cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Order with its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// PATCH payload
///
/// `delivery_crew` distinguishes absent from `null` (unassign).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub delivery_crew: Option<Option<i64>>,
    pub status: Option<bool>,
}

impl OrderPatch {
    pub fn is_empty(&self) -> bool {
        self.delivery_crew.is_none() && self.status.is_none()
    }
}

/// PUT payload (manager full replace)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReplace {
    pub delivery_crew: Option<i64>,
    pub status: bool,
    pub date: NaiveDate,
}

/// Order list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    pub status: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
