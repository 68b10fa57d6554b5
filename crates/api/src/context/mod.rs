//! Application context - dependency injection container

use std::sync::Arc;

use flashback_core::{CardStore, Clock, RandomSource, SessionProvider, StudyService};
use flashback_domain::{Config, Result};
use flashback_infra::errors::map_join_error;
use flashback_infra::{DbManager, SqliteCardStore, StaticSession, SystemClock, ThreadSafeRandom};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub store: Arc<dyn CardStore>,
    /// Login state; the session layer logs users in and out through this.
    pub session: Arc<StaticSession>,
    pub study: Arc<StudyService>,
}

impl AppContext {
    /// Create a new application context from the loaded configuration
    ///
    /// Configuration comes from `FLASHBACK_*` environment variables, falling
    /// back to a config file in one of the standard locations.
    pub async fn new() -> Result<Self> {
        let config = flashback_infra::config::load()?;
        Self::new_with_config(config).await
    }

    /// Create a new application context with custom configuration
    ///
    /// Tests use this to point at a temporary database and to supply a seeded
    /// random source.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        Self::new_with_services(config, Arc::new(ThreadSafeRandom::new()), Arc::new(SystemClock))
            .await
    }

    /// Create a new application context with explicit randomness and clock
    pub async fn new_with_services(
        config: Config,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.scheduler.validate()?;

        let db = open_database(&config).await?;
        let store: Arc<dyn CardStore> = Arc::new(SqliteCardStore::new(Arc::clone(&db)));
        let session = Arc::new(StaticSession::default());
        let session_port: Arc<dyn SessionProvider> = session.clone();

        let study = Arc::new(StudyService::new(
            Arc::clone(&store),
            random,
            clock,
            session_port,
            &config.scheduler,
        ));

        tracing::info!(
            db_path = %db.path().display(),
            new_batch_size = config.scheduler.new_batch_size,
            old_batch_size = config.scheduler.old_batch_size,
            "application context ready"
        );

        Ok(Self { config, db, store, session, study })
    }

    /// Check health of all application components
    ///
    /// The store is probed with a trivial query; the study service holds no
    /// state of its own and reports healthy once constructed.
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new()
            .add_component(self.check_database_health().await)
            .add_component(ComponentHealth::healthy("study_service"));
        status.calculate_score();
        status
    }

    /// Check database health by attempting a simple query
    ///
    /// Uses spawn_blocking to avoid blocking the async runtime with synchronous
    /// database operations.
    async fn check_database_health(&self) -> ComponentHealth {
        let db = Arc::clone(&self.db);
        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("database"),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "database health check failed");
                ComponentHealth::unhealthy("database", format!("query failed: {e}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "database health check task panicked");
                ComponentHealth::unhealthy("database", format!("task panic: {e}"))
            }
        }
    }

    /// Shutdown the application context
    ///
    /// Nothing holds background tasks; pooled connections close when the
    /// context is dropped.
    pub async fn shutdown(&self) -> Result<()> {
        tracing::info!(user = ?self.session.current_user(), "shutdown called on AppContext");
        self.session.log_out();
        Ok(())
    }
}

/// Open the pool and run migrations off the async runtime.
async fn open_database(config: &Config) -> Result<Arc<DbManager>> {
    let path = config.database.path.clone();
    let pool_size = config.database.pool_size;

    tokio::task::spawn_blocking(move || -> Result<Arc<DbManager>> {
        let db = DbManager::new(&path, pool_size)?;
        db.run_migrations()?;
        Ok(Arc::new(db))
    })
    .await
    .map_err(map_join_error)?
}
