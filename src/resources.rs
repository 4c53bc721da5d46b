// ABOUTME: Shared server resources injected into every route handler
// ABOUTME: Holds the pooled database handle and the loaded configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::database_plugins::factory::Database;
use std::sync::Arc;

/// State shared by all handlers
///
/// Cloning is cheap: the database is a pooled handle and the config is
/// behind an `Arc`.
#[derive(Clone)]
pub struct ServerResources {
    /// Subscription store
    pub database: Database,
    /// Loaded server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle a connected database with its configuration
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        Self {
            database,
            config: Arc::new(config),
        }
    }
}
