//! Core: configuration, shared state and the HTTP server
//!
//! - [`Config`] - environment driven configuration
//! - [`ServerState`] - pool and JWT service handed to every handler
//! - [`Server`] - binds the listener and serves the router

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{Server, app};
pub use state::ServerState;
