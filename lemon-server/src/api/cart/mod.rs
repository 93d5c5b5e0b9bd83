//! Cart API
//!
//! Operates on the caller's own cart only.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/cart/menu-items",
        get(handler::list)
            .post(handler::add)
            .delete(handler::clear),
    )
}
