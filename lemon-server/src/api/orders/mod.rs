//! Order API
//!
//! | Path | Method | Who |
//! |------|--------|-----|
//! | /api/orders | GET | any user (scoped by role) |
//! | /api/orders | POST | any user: place from cart |
//! | /api/orders | PATCH, DELETE | 400, an order id is required |
//! | /api/orders/{id} | GET | owner, assigned crew, manager |
//! | /api/orders/{id} | PATCH | manager; assigned crew for status only |
//! | /api/orders/{id} | PUT, DELETE | manager |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::place)
                .patch(handler::missing_id)
                .delete(handler::missing_id),
        )
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::replace)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
