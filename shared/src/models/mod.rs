//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//! Money fields are `f64` on the wire and in storage; arithmetic happens in
//! `rust_decimal::Decimal` on the server side.

pub mod cart;
pub mod category;
pub mod menu_item;
pub mod order;
pub mod page;
pub mod serde_helpers;
pub mod user;

// Re-exports
pub use cart::*;
pub use category::*;
pub use menu_item::*;
pub use order::*;
pub use page::*;
pub use user::*;
