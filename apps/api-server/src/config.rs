//! API server configuration.
//!
//! Configuration is loaded from environment variables (optionally from a
//! `.env` file) with fallback to defaults.
//!
//! | Variable             | Default   | Notes                              |
//! |----------------------|-----------|------------------------------------|
//! | `HOST`               | `0.0.0.0` |                                    |
//! | `PORT`               | `8080`    | must parse as u16                  |
//! | `DB_CONN`            | required  | `DATABASE_URL` accepted as fallback|
//! | `DB_MAX_CONNECTIONS` | `5`       |                                    |
//! | `RUST_LOG`           | `info`    | read by the tracing subscriber     |

use std::env;

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind
    pub host: String,

    /// TCP port to listen on
    pub port: u16,

    /// SQLite connection string
    pub database_url: String,

    /// Upper bound for the connection pool
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DB_CONN")
            .or_else(|| lookup("DATABASE_URL"))
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingRequired("DB_CONN".to_string()))?;

        Ok(AppConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_url,

            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .trim()
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,
        })
    }

    /// `host:port` for the TCP listener.
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
