//! Menu Item API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Reads are public, writes need manager rights
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::replace)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
