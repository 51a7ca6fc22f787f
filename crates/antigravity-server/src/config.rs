//! Configuration for the Antigravity server
//!
//! Values come from the process environment (a `.env` file is loaded first
//! by the binaries). Only `DATABASE_URL` is required.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use antigravity_core::DEFAULT_SEARCH_LIMIT;
use antigravity_state_postgres::PostgresConfig;

use crate::error::{ServerError, ServerResult};

/// Scheme selecting the in-memory graph store.
pub const MEMORY_URL_SCHEME: &str = "memory://";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub bind_address: String,

    /// Graph store location: `postgres://`, `postgresql://` or `memory://`
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    /// Whether to apply schema migrations on startup
    #[serde(default = "default_run_migrations")]
    pub database_run_migrations: bool,

    /// Seed nodes returned per search
    #[serde(default = "default_search_limit")]
    pub search_result_limit: usize,

    /// Bound on each store round-trip; `None` disables it
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: Option<u64>,

    /// Replace the graph with the demo content on startup
    #[serde(default)]
    pub seed_demo_data: bool,
}

fn default_port() -> u16 {
    3001
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_run_migrations() -> bool {
    true
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_store_timeout_ms() -> Option<u64> {
    Some(5000)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Overwrites `target` with the parsed value, or warns and keeps it.
fn override_parsed<T: FromStr>(target: &mut T, key: &str, raw: Option<String>) {
    if let Some(raw) = raw {
        match raw.trim().parse::<T>() {
            Ok(value) => *target = value,
            Err(_) => warn!("Invalid {} value: {}", key, raw),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn load() -> ServerResult<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn load_from<F>(lookup: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with defaults
        let mut config = Self::default();

        override_parsed(&mut config.port, "PORT", lookup("PORT"));

        if let Some(host) = lookup("HOST") {
            config.bind_address = host;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url.trim().to_string();
        }

        override_parsed(
            &mut config.database_max_connections,
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
        );

        if let Some(raw) = lookup("DATABASE_RUN_MIGRATIONS") {
            match parse_bool(&raw) {
                Some(run) => config.database_run_migrations = run,
                None => warn!("Invalid DATABASE_RUN_MIGRATIONS value: {}", raw),
            }
        }

        if let Some(raw) = lookup("SEARCH_RESULT_LIMIT") {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit >= 1 => config.search_result_limit = limit,
                _ => warn!("Invalid SEARCH_RESULT_LIMIT value: {}", raw),
            }
        }

        if let Some(raw) = lookup("STORE_TIMEOUT_MS") {
            let trimmed = raw.trim();
            if trimmed.eq_ignore_ascii_case("none") || trimmed == "0" {
                config.store_timeout_ms = None;
            } else if let Ok(ms) = trimmed.parse::<u64>() {
                config.store_timeout_ms = Some(ms);
            } else {
                warn!("Invalid STORE_TIMEOUT_MS value: {}", raw);
            }
        }

        if let Some(raw) = lookup("SEED_DEMO_DATA") {
            match parse_bool(&raw) {
                Some(seed) => config.seed_demo_data = seed,
                None => warn!("Invalid SEED_DEMO_DATA value: {}", raw),
            }
        }

        config.validate()?;

        info!(
            port = config.port,
            store = config.store_kind(),
            search_result_limit = config.search_result_limit,
            "Loaded server configuration"
        );
        Ok(config)
    }

    /// Checks the required fields.
    pub fn validate(&self) -> ServerResult<()> {
        if self.database_url.is_empty() {
            return Err(ServerError::ConfigError(
                "DATABASE_URL is required".to_string(),
            ));
        }

        if !self.uses_memory_store() && !PostgresConfig::is_postgres_url(&self.database_url) {
            return Err(ServerError::ConfigError(format!(
                "Unsupported DATABASE_URL scheme: {}",
                self.database_url.split("://").next().unwrap_or_default()
            )));
        }

        if self.search_result_limit == 0 {
            return Err(ServerError::ConfigError(
                "SEARCH_RESULT_LIMIT must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with(MEMORY_URL_SCHEME)
    }

    fn store_kind(&self) -> &'static str {
        if self.uses_memory_store() {
            "memory"
        } else {
            "postgres"
        }
    }

    pub fn store_timeout(&self) -> Option<Duration> {
        self.store_timeout_ms.map(Duration::from_millis)
    }

    pub fn postgres_config(&self) -> PostgresConfig {
        PostgresConfig {
            max_connections: self.database_max_connections,
            run_migrations: self.database_run_migrations,
            ..PostgresConfig::new(self.database_url.clone())
        }
    }

    /// Address to bind, from `bind_address` and `port`.
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| {
                ServerError::ConfigError(format!(
                    "Invalid bind address {}:{}: {}",
                    self.bind_address, self.port, e
                ))
            })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_host(),
            database_url: String::new(),
            database_max_connections: default_max_connections(),
            database_run_migrations: default_run_migrations(),
            search_result_limit: default_search_limit(),
            store_timeout_ms: default_store_timeout_ms(),
            seed_demo_data: false,
        }
    }
}
