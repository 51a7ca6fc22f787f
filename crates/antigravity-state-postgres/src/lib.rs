//! PostgreSQL graph store for the Antigravity knowledge graph
//!
//! Implements `antigravity_core::GraphStore` on top of a `sqlx` connection
//! pool. Queries are checked at runtime, so no database is needed to build.

use serde::{Deserialize, Serialize};

pub mod connection;
pub mod migrations;
pub mod store;

pub use connection::PostgresConnection;
pub use store::PostgresGraphStore;

/// Configuration for PostgreSQL connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    /// Database connection string; there is no default
    pub connection_string: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Timeout for acquiring a connection from the pool (in seconds)
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Whether to run migrations on startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_run_migrations() -> bool {
    true
}

impl PostgresConfig {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            run_migrations: default_run_migrations(),
        }
    }

    /// Whether `url` names a PostgreSQL database.
    pub fn is_postgres_url(url: &str) -> bool {
        url.starts_with("postgres://") || url.starts_with("postgresql://")
    }
}
