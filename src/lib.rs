// ABOUTME: Main library entry point for the subscription cost service
// ABOUTME: Exposes the REST API, storage backends, configuration, and logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Subscription Service
//!
//! A REST service that records users' recurring online subscriptions and
//! totals what they cost over a month range.
//!
//! ## Features
//!
//! - **Subscription CRUD**: create, list, fetch, replace, and delete records
//! - **Cost aggregation**: sum prices of subscriptions overlapping a `MM-YYYY` period
//! - **Pluggable storage**: `SQLite` (file or in-memory) and `PostgreSQL`
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers decoding path and JSON input
//! - **Database plugins**: the `SubscriptionStore` trait and its backends
//! - **Config**: environment-driven settings with `.env` support
//! - **Middleware**: request ids and per-request tracing spans
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use subscription_service::config::ServerConfig;
//! use subscription_service::database_plugins::factory::Database;
//! use subscription_service::errors::AppResult;
//! use subscription_service::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::from_config(&config.database).await?;
//!     let resources = Arc::new(ServerResources::new(database, config));
//!     subscription_service::server::run(resources).await
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Storage abstraction and backends
pub mod database_plugins;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Subscription domain models
pub mod models;

/// Shared handler state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;
