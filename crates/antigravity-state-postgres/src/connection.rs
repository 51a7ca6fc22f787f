use antigravity_core::{CoreError, CoreResult};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::{debug, info};

use crate::migrations::generate_migrations;
use crate::PostgresConfig;

/// Database connection manager for Postgres
#[derive(Clone, Debug)]
pub struct PostgresConnection {
    pub(crate) pool: PgPool,
}

impl PostgresConnection {
    /// Opens a pool and, when configured, applies the schema migrations.
    pub async fn connect(config: &PostgresConfig) -> CoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.connection_string)
            .await
            .map_err(|e| CoreError::store_failure("Failed to connect to PostgreSQL", Some(e)))?;

        debug!(max_connections = config.max_connections, "Connected to PostgreSQL");

        let conn = Self { pool };
        if config.run_migrations {
            conn.run_migrations().await?;
        }
        Ok(conn)
    }

    /// Builds a pool that connects on first use. No I/O happens here.
    pub fn connect_lazy(config: &PostgresConfig) -> CoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(&config.connection_string)
            .map_err(|e| CoreError::store_failure("Invalid PostgreSQL connection string", Some(e)))?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> CoreResult<()> {
        info!("Running database migrations");

        for (name, sql) in generate_migrations() {
            debug!(migration = name, "Applying migration");
            sqlx::raw_sql(sql)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    CoreError::store_failure(format!("Failed to apply migration {}", name), Some(e))
                })?;
        }

        info!("Migrations completed successfully");
        Ok(())
    }

    /// Get a reference to the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
