//! Shared types for the Little Lemon backend
//!
//! Error types and the data models exchanged between the server and its
//! API clients.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
