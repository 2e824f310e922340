use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::database::gateway::Gateway;
use crate::database::memory::MemoryGateway;
use crate::database::postgres::PgGateway;
use crate::filter::FilterError;

/// Errors surfaced by gateway implementations
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Duplicate key {key} in {table}")]
    Conflict { table: &'static str, key: String },

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the single process-wide gateway at startup.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Creates the Postgres pool. Connections are opened on first use so the
    /// process can report liveness while the database is still coming up.
    pub fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(url)?;

        info!(max_connections = config.max_connections, "Created database pool");
        Ok(pool)
    }

    /// Postgres when `DATABASE_URL` is configured, otherwise the in-memory store.
    pub fn gateway(config: &DatabaseConfig) -> Result<Arc<dyn Gateway>, DatabaseError> {
        if config.url.is_some() {
            let pool = Self::connect(config)?;
            return Ok(Arc::new(PgGateway::new(pool)));
        }

        warn!("DATABASE_URL not set, falling back to the in-memory gateway; data will not persist");
        Ok(Arc::new(MemoryGateway::new()))
    }
}
