//! Authentication Routes
//!
//! - POST /api/auth/users: register (public)
//! - POST /api/auth/token: obtain a bearer token (public)
//! - GET  /api/auth/me: current user

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/users", post(handler::register))
        .route("/api/auth/token", post(handler::token))
        .route("/api/auth/me", get(handler::me))
}
