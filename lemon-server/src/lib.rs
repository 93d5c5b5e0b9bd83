//! Little Lemon - restaurant ordering backend
//!
//! # Modules
//!
//! ```text
//! lemon-server/src/
//! ├── core/      # config, state, server
//! ├── auth/      # JWT, passwords, roles, middleware
//! ├── api/       # HTTP routes and handlers
//! ├── orders/    # money arithmetic, order workflow
//! ├── db/        # SQLite pool, migrations, repositories
//! └── utils/     # logging, validation, extractors
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState, app};
pub use shared::error::{AppError, AppResult, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and start logging
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok().filter(|v| !v.is_empty());
    let log_dir = std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    __    _ __  __  __        __
   / /   (_) /_/ /_/ /__     / /   ___  ____ ___  ____  ____
  / /   / / __/ __/ / _ \   / /   / _ \/ __ `__ \/ __ \/ __ \
 / /___/ / /_/ /_/ /  __/  / /___/  __/ / / / / / /_/ / / / /
/_____/_/\__/\__/_/\___/  /_____/\___/_/ /_/ /_/\____/_/ /_/
    "#
    );
}
