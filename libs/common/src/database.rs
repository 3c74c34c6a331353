//! Database module for handling PostgreSQL connections and operations
//!
//! This module provides connection pooling, configuration, health checks,
//! and the embedded schema migrations for the Findex database.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Pool, Postgres};
use std::env;
use tracing::info;

/// Database configuration struct
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: PostgreSQL connection URL
    /// - `DATABASE_MAX_CONNECTIONS`: Maximum number of pooled connections (default: 5)
    pub fn from_env() -> DatabaseResult<Self> {
        let database_url = env::var("DATABASE_URL").map_err(|_| {
            DatabaseError::Configuration("DATABASE_URL environment variable is required".into())
        })?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

/// Initialize a PostgreSQL connection pool
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<Pool<Postgres>> {
    let pool = PgPool::connect_with(
        config
            .database_url
            .parse()
            .map_err(|e| DatabaseError::Configuration(format!("Invalid database URL: {}", e)))?,
    )
    .await
    .map_err(DatabaseError::Connection)?;

    Ok(pool)
}

/// Apply the embedded schema migrations.
///
/// Creates the `users`, `sessions`, and `pages` tables together with the
/// search-vector trigger. The trigger keeps `pages.content_tsv` consistent
/// with `(language, content)` for every write path, so callers never derive
/// the vector themselves.
pub async fn run_migrations(pool: &PgPool) -> DatabaseResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Check database connectivity
pub async fn health_check(pool: &PgPool) -> DatabaseResult<bool> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(DatabaseError::Query)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_connections_defaults_to_five() {
        unsafe { env::set_var("DATABASE_URL", "postgresql://localhost/findex") };
        if env::var("DATABASE_MAX_CONNECTIONS").is_err() {
            let config = DatabaseConfig::from_env().expect("Failed to create database config");
            assert_eq!(config.max_connections, 5);
        }
    }
}
