// ABOUTME: Environment-based server configuration for the subscription service
// ABOUTME: Loads HTTP, database, and runtime settings from environment variables and .env
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use super::database::DatabaseConfig;
use super::types::{Environment, LogLevel};
use super::{env_var_or, parse_env_or};
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, info};

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// HTTP API port
    pub port: u16,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: defaults::HTTP_PORT,
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    /// Load listener settings from `HOST`, `HTTP_PORT`, and `REQUEST_TIMEOUT_SECS`
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an unparsable value
    pub fn from_env() -> AppResult<Self> {
        let host = env_var_or("HOST", defaults::HOST);
        Ok(Self {
            host: host
                .trim()
                .parse()
                .map_err(|e| AppError::config_invalid(format!("Invalid HOST value: {e}")))?,
            port: parse_env_or("HTTP_PORT", defaults::HTTP_PORT)?,
            request_timeout_secs: parse_env_or(
                "REQUEST_TIMEOUT_SECS",
                defaults::REQUEST_TIMEOUT_SECS,
            )?,
        })
    }

    /// Socket address the server binds to
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Per-request timeout as a `Duration`
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    /// HTTP listener settings
    pub http: HttpConfig,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Database configuration
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first when present;
    /// variables already set in the process environment take precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an invalid value
    pub fn from_env() -> AppResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {}", path.display()),
            Err(e) => debug!("No .env file loaded: {e}"),
        }

        let config = Self {
            http: HttpConfig::from_env()?,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            database: DatabaseConfig::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the port or timeout is zero or the pool bounds are inverted
    pub fn validate(&self) -> AppResult<()> {
        if self.http.port == 0 {
            return Err(AppError::config_invalid("HTTP_PORT must not be 0"));
        }
        if self.http.request_timeout_secs == 0 {
            return Err(AppError::config_invalid(
                "REQUEST_TIMEOUT_SECS must be greater than 0",
            ));
        }
        let pool = &self.database.postgres_pool;
        if pool.min_connections > pool.max_connections {
            return Err(AppError::config_invalid(format!(
                "POSTGRES_MIN_CONNECTIONS ({}) exceeds POSTGRES_MAX_CONNECTIONS ({})",
                pool.min_connections, pool.max_connections
            )));
        }
        Ok(())
    }

    /// Human-readable summary for startup logs; never includes credentials
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Subscription Service Configuration:\n\
             - Listen: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {} ({})\n\
             - Auto Migrate: {}\n\
             - Request Timeout: {}s",
            self.http.socket_addr(),
            self.environment,
            self.log_level,
            if self.database.url.is_sqlite() {
                "SQLite"
            } else {
                "PostgreSQL"
            },
            self.database.url,
            self.database.auto_migrate,
            self.http.request_timeout_secs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::database::DatabaseUrl;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http.port, defaults::HTTP_PORT);
        assert!(config.database.url.is_memory());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = ServerConfig::default();
        config.http.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_pool_bounds() {
        let mut config = ServerConfig::default();
        config.database.postgres_pool.min_connections = 20;
        config.database.postgres_pool.max_connections = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_hides_password() {
        let mut config = ServerConfig::default();
        config.database.url =
            DatabaseUrl::parse_url("postgres://app:hunter2@db:5432/subs").unwrap();
        let summary = config.summary();
        assert!(summary.contains("PostgreSQL"));
        assert!(!summary.contains("hunter2"));
    }
}
