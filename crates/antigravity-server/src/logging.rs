//! Structured logging setup using tracing.
//!
//! `RUST_LOG` takes precedence over the configured level when it is set.

use std::env;
use std::str::FromStr;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{ServerError, ServerResult};

/// Output format of the stdout log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, for development
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ServerError::LoggingError(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}

/// Initialize the global subscriber.
pub fn init_logging(level: &str, format: LogFormat) -> ServerResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| ServerError::LoggingError(format!("Invalid log level {}: {}", level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_target(true))
            .try_init(),
    };

    result.map_err(|e| {
        ServerError::LoggingError(format!("Failed to set global default subscriber: {}", e))
    })?;

    info!(log_level = level, ?format, "Initialized structured logging");
    Ok(())
}

/// Initialize logging from `LOG_LEVEL` (default `info`) and `LOG_FORMAT`
/// (default `pretty`). Runs before the server configuration is loaded so
/// configuration warnings are visible.
pub fn init_from_env() -> ServerResult<()> {
    let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let format = match env::var("LOG_FORMAT") {
        Ok(raw) => raw.parse()?,
        Err(_) => LogFormat::default(),
    };
    init_logging(&level, format)
}
