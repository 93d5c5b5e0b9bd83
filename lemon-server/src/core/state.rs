use std::sync::Arc;

use shared::error::AppError;
use sqlx::SqlitePool;

use crate::auth::{JwtService, Role, password};
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{group, user};

/// Shared handler state
///
/// Cheap to clone: the pool and JWT service are reference counted.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// Open the database and run the startup steps
    ///
    /// 1. Open the pool and apply migrations
    /// 2. Create the role groups
    /// 3. Create the bootstrap admin if configured
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let state = Self::new(config.clone(), db.pool);
        state.prepare().await?;
        Ok(state)
    }

    /// Startup steps that only need a pool (shared with in-memory setups)
    pub async fn prepare(&self) -> Result<(), AppError> {
        group::ensure_default_groups(&self.pool).await?;
        tracing::info!("Default groups ensured");

        if let (Some(username), Some(pw)) =
            (&self.config.admin_username, &self.config.admin_password)
        {
            bootstrap_admin(&self.pool, username, pw).await?;
        }
        Ok(())
    }
}

/// Create the admin user once; an existing user of that name is left alone
async fn bootstrap_admin(pool: &SqlitePool, username: &str, pw: &str) -> Result<(), AppError> {
    if user::find_by_username(pool, username).await?.is_some() {
        tracing::debug!(username = %username, "Bootstrap admin already exists");
        return Ok(());
    }

    let hash = password::hash_password(pw)
        .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
    let admin = user::create(pool, username, "", &hash, true).await?;
    group::add_member(pool, admin.id, Role::Customer.group_name()).await?;

    tracing::info!(user_id = admin.id, username = %username, "Bootstrap admin created");
    Ok(())
}
