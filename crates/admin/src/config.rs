//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults target a local `MongoDB`.
//!
//! - `MONGO_URL` - `MongoDB` connection string (default: `mongodb://localhost:27017/`)
//! - `MONGO_DATABASE` - Database name (default: `eshop_db`)
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 8501)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Default connection string, a local server on the standard port.
pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017/";
/// Default database name.
pub const DEFAULT_DATABASE_NAME: &str = "eshop_db";
/// Upper bound on how long the startup connection attempt may take.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Document database connection settings
    pub database: DatabaseConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Emit JSON logs instead of human-readable text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Document database connection settings.
///
/// Implements `Debug` manually because the URL may embed credentials.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Connection string
    pub url: SecretString,
    /// Database holding the `products`, `users` and `logs` collections
    pub name: String,
    /// Server selection timeout for the startup connection attempt
    pub connect_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("name", &self.name)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl DatabaseConfig {
    /// Load database settings from the environment.
    ///
    /// Used directly by the CLI, which needs no HTTP settings.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(&env_lookup)
    }

    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Self {
        Self {
            url: SecretString::from(
                lookup("MONGO_URL").unwrap_or_else(|| DEFAULT_MONGO_URL.to_string()),
            ),
            name: lookup("MONGO_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            connect_timeout: CONNECT_TIMEOUT,
        }
    }

    /// Same server, different database. Used to isolate test runs.
    #[must_use]
    pub fn with_database_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Connection string, exposed only to the driver.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.expose_secret()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(&env_lookup)
    }

    /// Build configuration from an arbitrary key lookup.
    fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = DatabaseConfig::from_lookup(lookup);
        let host = lookup("ADMIN_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = lookup("ADMIN_PORT")
            .unwrap_or_else(|| "8501".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let json_logs = lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_sample_rate(lookup, "SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate =
            parse_sample_rate(lookup, "SENTRY_TRACES_SAMPLE_RATE", 0.1)?;

        Ok(Self {
            database,
            host,
            port,
            json_logs,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read a variable from the process environment.
fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse a sample rate in `[0.0, 1.0]`, falling back to `default` when unset.
fn parse_sample_rate(
    lookup: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: f32,
) -> Result<f32, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }

    Ok(rate)
}
