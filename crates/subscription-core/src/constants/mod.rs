// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for limits, messages, routes, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Service identifiers used in logs and health output
pub mod service_names {
    /// Server binary / tracing target name
    pub const SUBSCRIPTION_SERVICE: &str = "subscription-service";
}

/// API endpoints
pub mod endpoints {
    /// Versioned API prefix
    pub const API_V1: &str = "/api/v1";
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// Readiness endpoint
    pub const READINESS: &str = "/ready";
}

/// Validation limits for subscription records
pub mod limits {
    /// Maximum stored length of `service_name` (VARCHAR(256) in `PostgreSQL`)
    pub const SERVICE_NAME_MAX_LEN: usize = 256;
    /// Smallest four-digit year accepted by the `MM-YYYY` codec
    pub const MIN_YEAR: i32 = 0;
    /// Largest four-digit year accepted by the `MM-YYYY` codec
    pub const MAX_YEAR: i32 = 9999;
}

/// Database table and column names
pub mod tables {
    /// Single table backing the store
    pub const SUBSCRIPTIONS: &str = "subscriptions";
}

/// Client-facing messages
pub mod messages {
    /// Aggregation request without both bounds
    pub const PERIOD_BOUNDS_REQUIRED: &str = "Period start and end required";
    /// Successful delete acknowledgement
    pub const SUBSCRIPTION_DELETED: &str = "subscription successfully deleted";
    /// Generic body for any 5xx response
    pub const INTERNAL_ERROR: &str = "An internal server error occurred";
}

/// Default configuration values
pub mod defaults {
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8080;
    /// Default per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 5;
    /// Default database when nothing is configured
    pub const DATABASE_URL: &str = "sqlite::memory:";
    /// Default `PostgreSQL` port when assembling a URL from parts
    pub const POSTGRES_PORT: u16 = 5432;
}

/// `PostgreSQL` pool defaults
pub mod database {
    /// Maximum pool size
    pub const MAX_CONNECTIONS: u32 = 10;
    /// Minimum pool size
    pub const MIN_CONNECTIONS: u32 = 2;
    /// Acquire timeout in seconds
    pub const ACQUIRE_TIMEOUT_SECS: u64 = 30;
}
