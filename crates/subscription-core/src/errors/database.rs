// ABOUTME: Structured error types for database operations
// ABOUTME: Distinguishes missing rows from storage failures so handlers can map 404 vs 500
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Failures raised by the subscription store
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No row matched the requested key
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Human-readable entity name
        entity_type: &'static str,
        /// Key that was looked up
        entity_id: String,
    },

    /// Connection could not be established or was lost
    #[error("database connection error: {0}")]
    ConnectionError(String),

    /// Statement failed to execute
    #[error("database query error: {context}")]
    QueryError {
        /// Backend error text, kept for logs only
        context: String,
    },

    /// Schema creation failed
    #[error("database migration error: {0}")]
    MigrationError(String),

    /// A stored value could not be mapped back into the domain model
    #[error("invalid stored data in column '{column}': {reason}")]
    InvalidData {
        /// Column holding the offending value
        column: &'static str,
        /// Parse failure detail
        reason: String,
    },

    /// URL scheme or backend not available in this build
    #[error("unsupported database: {0}")]
    Unsupported(String),
}

impl DatabaseError {
    /// Shorthand for a missing subscription
    #[must_use]
    pub fn subscription_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Subscription",
            entity_id: id.to_string(),
        }
    }

    /// Whether this error represents a missing row
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for store operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::ConnectionError(error.to_string()),
            _ => Self::QueryError {
                context: error.to_string(),
            },
        }
    }
}
