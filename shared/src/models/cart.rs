//! Cart Model

use serde::{Deserialize, Serialize};

/// One (user, menu item) accumulation line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLine {
    pub id: i64,
    pub user_id: i64,
    pub menu_item_id: i64,
    pub menu_item_title: String,
    pub quantity: i64,
    /// Catalog price at the time the line was first created
    pub unit_price: f64,
    pub line_total: f64,
}

/// Add-to-cart payload
///
/// Both fields are optional at the serde level so that a missing id is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartAdd {
    #[serde(alias = "menuitem")]
    pub menu_item_id: Option<i64>,
    pub quantity: Option<i64>,
}

/// Cart listing with grand total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: f64,
}
