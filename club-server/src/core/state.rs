use std::sync::Arc;

use crate::admission::AdmissionService;
use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::CatalogService;
use crate::utils::clock::{Clock, SystemClock};

/// Server state - shared references to every service
///
/// Cloning is cheap: the pool and services are reference counted.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | immutable settings |
/// | db | DbService | SQLite pool |
/// | clock | Arc<dyn Clock> | time source for windows and timestamps |
/// | jwt_service | Arc<JwtService> | admin token issue / validation |
/// | admission | Arc<AdmissionService> | registration attempts |
/// | catalog | CatalogService | club CRUD and rosters |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub clock: Arc<dyn Clock>,
    pub jwt_service: Arc<JwtService>,
    pub admission: Arc<AdmissionService>,
    pub catalog: CatalogService,
}

impl ServerState {
    /// Wire every service on top of an open database
    pub fn new(config: Config, db: DbService, clock: Arc<dyn Clock>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let admission = Arc::new(AdmissionService::new(db.pool.clone(), clock.clone()));
        let catalog = CatalogService::new(
            db.pool.clone(),
            clock.clone(),
            admission.clone(),
            config.timezone,
        );

        Self {
            config,
            db,
            clock,
            jwt_service,
            admission,
            catalog,
        }
    }

    /// Open the configured database (running migrations) and build the state
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        tracing::info!(
            path = %config.database_path,
            timezone = %config.timezone,
            "Database ready"
        );
        Ok(Self::new(config.clone(), db, Arc::new(SystemClock)))
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.db.pool
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }
}
