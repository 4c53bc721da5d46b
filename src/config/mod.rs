// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Handles environment parsing for the HTTP listener, database, and runtime options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the subscription service
//!
//! - **Environment**: `ServerConfig` assembled from environment variables
//! - **Database**: connection URL resolution and pool sizing
//! - **Types**: shared enums such as `Environment` and `LogLevel`

use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Database connection configuration
pub mod database;
/// Environment and server configuration
pub mod environment;
/// Shared configuration enums
pub mod types;

pub use database::{DatabaseConfig, DatabaseUrl, PostgresPoolConfig};
pub use environment::{HttpConfig, ServerConfig};
pub use types::{Environment, LogLevel};

/// Read an environment variable, falling back to `default` when unset
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env_or<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    env::var(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value: {e}")))
    })
}
