use std::path::Path;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::pricing::DiscountService;
use crate::utils::AppError;

/// Application state shared across handlers
///
/// Cloning is cheap: the pool is an `Arc` internally and services hold
/// pool clones.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    discounts: DiscountService,
}

impl AppState {
    /// Assemble state from an existing pool (tests use this with an
    /// in-memory database)
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let discounts = DiscountService::new(pool.clone(), config.pricing());
        Self {
            config,
            pool,
            discounts,
        }
    }

    /// Initialize state for a real server run: ensure the data
    /// directory exists, open the database, apply migrations
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        if let Some(parent) = Path::new(&config.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::internal(format!("Failed to create data dir: {e}")))?;
        }

        let db = DbService::new(&config.database_path).await?;
        Ok(Self::new(config.clone(), db.pool))
    }

    pub fn discounts(&self) -> &DiscountService {
        &self.discounts
    }
}
