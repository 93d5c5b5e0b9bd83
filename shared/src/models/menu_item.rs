//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Menu item as returned by the API (category nested, read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub featured: bool,
    pub category: Category,
}

/// Create (and full replace) payload
///
/// `price` accepts either a JSON number or a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub featured: bool,
    pub category_id: i64,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub featured: Option<bool>,
    pub category_id: Option<i64>,
}

/// Sort keys accepted by the menu item listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItemOrdering {
    #[serde(rename = "price")]
    PriceAsc,
    #[serde(rename = "-price")]
    PriceDesc,
    #[serde(rename = "title")]
    TitleAsc,
    #[serde(rename = "-title")]
    TitleDesc,
}

impl MenuItemOrdering {
    /// SQL `ORDER BY` fragment (whitelisted, never built from user input)
    pub fn sql(&self) -> &'static str {
        match self {
            Self::PriceAsc => "m.price ASC, m.id ASC",
            Self::PriceDesc => "m.price DESC, m.id ASC",
            Self::TitleAsc => "m.title ASC",
            Self::TitleDesc => "m.title DESC",
        }
    }
}

/// Menu item list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemQuery {
    /// Category slug
    pub category: Option<String>,
    pub featured: Option<bool>,
    /// Substring match on item title or category title
    pub search: Option<String>,
    pub ordering: Option<MenuItemOrdering>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
