// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, in-memory databases, fixtures, and a fully layered router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `subscription_service`

use anyhow::Result;
use axum::Router;
use sqlx::SqlitePool;
use std::sync::{Arc, Once};
use subscription_service::{
    config::{PostgresPoolConfig, ServerConfig},
    database_plugins::{factory::Database, SubscriptionStore},
    models::{MonthYear, NewSubscription},
    resources::ServerResources,
    server,
};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fresh, migrated in-memory `SQLite` database
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:", &PostgresPoolConfig::default()).await?;
    database.migrate().await?;
    Ok(database)
}

/// Server resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        ServerConfig::default(),
    )))
}

/// The full application router with every middleware layer
pub async fn create_test_router() -> Result<(Router, Arc<ServerResources>)> {
    let resources = create_test_resources().await?;
    Ok((server::build_router(Arc::clone(&resources)), resources))
}

/// Connection pool behind an in-memory test database
#[allow(unreachable_patterns)]
pub fn sqlite_pool(database: &Database) -> &SqlitePool {
    match database {
        Database::SQLite(db) => db.pool(),
        _ => panic!("test databases are SQLite"),
    }
}

/// `MonthYear` from literal parts
pub fn month(year: i32, month: u32) -> MonthYear {
    MonthYear::new(year, month).expect("valid month")
}

/// Subscription fixture
pub fn subscription(
    user_id: Uuid,
    service_name: &str,
    price: i64,
    start: MonthYear,
    end: Option<MonthYear>,
) -> NewSubscription {
    NewSubscription {
        service_name: service_name.to_owned(),
        price,
        user_id,
        start_date: start,
        end_date: end,
    }
}
