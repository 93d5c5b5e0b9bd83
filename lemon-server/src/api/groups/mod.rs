//! Group Membership API
//!
//! | Path | Method | Who |
//! |------|--------|-----|
//! | /api/groups/manager/users | GET, POST | manager or admin |
//! | /api/groups/manager/users/{id} | DELETE | admin |
//! | /api/groups/delivery-crew/users | GET, POST | manager or admin |
//! | /api/groups/delivery-crew/users/{id} | DELETE | manager or admin |

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/groups/manager/users",
            get(handler::list_managers).post(handler::add_manager),
        )
        .route(
            "/api/groups/manager/users/{id}",
            delete(handler::remove_manager),
        )
        .route(
            "/api/groups/delivery-crew/users",
            get(handler::list_crew).post(handler::add_crew),
        )
        .route(
            "/api/groups/delivery-crew/users/{id}",
            delete(handler::remove_crew),
        )
}
