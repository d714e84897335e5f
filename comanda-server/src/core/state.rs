use sqlx::SqlitePool;

use crate::cashier::ShiftService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// Server state - shared by every handler
///
/// Cloning is cheap: the pool and the shift service are reference counted.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | Configuration (immutable) |
/// | pool | SQLite connection pool |
/// | shifts | Single-writer cash shift service |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub shifts: ShiftService,
}

impl ServerState {
    /// Open the database and build all services
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        if let Some(parent) = std::path::Path::new(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = DbService::new(&config.database_path)
            .await
            .map_err(|e| ServerError::Startup(format!("Database init failed: {}", e.message)))?;

        Ok(Self::with_pool(config.clone(), db.pool))
    }

    /// Build the state around an existing pool (tests, embedding)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let shifts = ShiftService::new(pool.clone(), config.timezone);
        Self {
            config,
            pool,
            shifts,
        }
    }
}
