use shared::error::{AppError, ErrorCode};

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Notes |
/// |----------|---------|-------|
/// | HTTP_PORT | 8000 | |
/// | DATABASE_PATH | lemon.db | SQLite file, created if missing |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | - | required outside development, >= 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | |
/// | JWT_ISSUER / JWT_AUDIENCE | little-lemon / little-lemon-clients | |
/// | ADMIN_USERNAME / ADMIN_PASSWORD | - | bootstrap admin, both required |
/// | LOG_LEVEL | - | fallback when RUST_LOG is unset |
/// | LOG_DIR | - | enables daily rolling log files |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_path: String,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(environment == "development")
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "lemon.db".into()),
            environment,
            jwt,
            admin_username: non_empty_var("ADMIN_USERNAME"),
            admin_password: non_empty_var("ADMIN_PASSWORD"),
            log_level: non_empty_var("LOG_LEVEL"),
            log_dir: non_empty_var("LOG_DIR"),
        })
    }

    /// In-process configuration for tests and embedding
    pub fn for_tests(jwt: JwtConfig) -> Self {
        Self {
            http_port: 0,
            database_path: ":memory:".into(),
            environment: "test".into(),
            jwt,
            admin_username: None,
            admin_password: None,
            log_level: None,
            log_dir: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
