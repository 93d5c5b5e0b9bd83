//! HTTP API
//!
//! - [`health`] - liveness and database probe
//! - [`auth`] - registration, tokens, current user
//! - [`categories`] - category CRUD
//! - [`menu_items`] - menu item CRUD and listing filters
//! - [`cart`] - the caller's cart
//! - [`orders`] - order placement and workflow
//! - [`groups`] - manager / delivery crew membership

pub mod auth;
pub mod cart;
pub mod categories;
pub mod groups;
pub mod health;
pub mod menu_items;
pub mod orders;

use axum::Router;

use crate::core::ServerState;

/// All routes, without state or layers
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(categories::router())
        .merge(menu_items::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(groups::router())
}
